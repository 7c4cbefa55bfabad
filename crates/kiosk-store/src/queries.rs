//! Read operations. Pure filters and sorts over the tables; nothing here
//! mutates the store.

use kiosk_types::models::{Category, Message, Order, Product, Review, User};

use crate::Store;

impl Store {
    // -- Users --

    pub fn user(&self, id: i64) -> Option<User> {
        self.read(|t| t.users.get(id).cloned())
    }

    pub fn user_by_username(&self, username: &str) -> Option<User> {
        self.read(|t| t.users.iter().find(|u| u.username == username).cloned())
    }

    pub fn user_by_email(&self, email: &str) -> Option<User> {
        self.read(|t| t.users.iter().find(|u| u.email == email).cloned())
    }

    pub fn sellers(&self) -> Vec<User> {
        self.read(|t| t.users.iter().filter(|u| u.is_seller).cloned().collect())
    }

    // -- Categories --

    pub fn categories(&self) -> Vec<Category> {
        self.read(|t| {
            let mut categories: Vec<Category> = t.categories.iter().cloned().collect();
            categories.sort_by_key(|c| c.id);
            categories
        })
    }

    pub fn category_by_slug(&self, slug: &str) -> Option<Category> {
        self.read(|t| t.categories.iter().find(|c| c.slug == slug).cloned())
    }

    // -- Products --

    pub fn products(&self) -> Vec<Product> {
        self.read(|t| {
            let mut products: Vec<Product> = t.products.iter().cloned().collect();
            products.sort_by_key(|p| p.id);
            products
        })
    }

    pub fn product(&self, id: i64) -> Option<Product> {
        self.read(|t| t.products.get(id).cloned())
    }

    pub fn products_by_category(&self, category_id: i64) -> Vec<Product> {
        self.filtered_products(|p| p.category_id == category_id)
    }

    pub fn products_by_seller(&self, seller_id: i64) -> Vec<Product> {
        self.filtered_products(|p| p.seller_id == seller_id)
    }

    pub fn featured_products(&self) -> Vec<Product> {
        self.filtered_products(|p| p.featured)
    }

    pub fn trending_products(&self) -> Vec<Product> {
        self.filtered_products(|p| p.trending)
    }

    /// Case-insensitive substring match against name or description.
    /// An empty query matches every product (the empty string is a substring
    /// of everything); callers that want "no results" must not pass one.
    pub fn search_products(&self, query: &str) -> Vec<Product> {
        let needle = query.to_lowercase();
        self.filtered_products(|p| {
            p.name.to_lowercase().contains(&needle)
                || p.description.to_lowercase().contains(&needle)
        })
    }

    fn filtered_products(&self, keep: impl Fn(&Product) -> bool) -> Vec<Product> {
        self.read(|t| {
            let mut products: Vec<Product> = t.products.iter().filter(|p| keep(p)).cloned().collect();
            products.sort_by_key(|p| p.id);
            products
        })
    }

    // -- Reviews --

    /// Reviews for a product, oldest first. Id breaks created_at ties so the
    /// order is deterministic.
    pub fn reviews_by_product(&self, product_id: i64) -> Vec<Review> {
        self.read(|t| {
            let mut reviews: Vec<Review> = t
                .reviews
                .iter()
                .filter(|r| r.product_id == product_id)
                .cloned()
                .collect();
            reviews.sort_by_key(|r| (r.created_at, r.id));
            reviews
        })
    }

    // -- Orders --

    /// A buyer's orders, newest first.
    pub fn orders_by_user(&self, user_id: i64) -> Vec<Order> {
        self.sorted_orders(|o| o.user_id == user_id)
    }

    /// A seller's incoming orders, newest first.
    pub fn orders_by_seller(&self, seller_id: i64) -> Vec<Order> {
        self.sorted_orders(|o| o.seller_id == seller_id)
    }

    pub fn order(&self, id: i64) -> Option<Order> {
        self.read(|t| t.orders.get(id).cloned())
    }

    fn sorted_orders(&self, keep: impl Fn(&Order) -> bool) -> Vec<Order> {
        self.read(|t| {
            let mut orders: Vec<Order> = t.orders.iter().filter(|o| keep(o)).cloned().collect();
            orders.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
            orders
        })
    }

    // -- Messages --

    /// The conversation between two users, chronological. Symmetric in its
    /// arguments: (a, b) and (b, a) return the same thread.
    pub fn messages_between(&self, user_a: i64, user_b: i64) -> Vec<Message> {
        self.read(|t| {
            let mut messages: Vec<Message> = t
                .messages
                .iter()
                .filter(|m| {
                    (m.sender_id == user_a && m.receiver_id == user_b)
                        || (m.sender_id == user_b && m.receiver_id == user_a)
                })
                .cloned()
                .collect();
            messages.sort_by_key(|m| (m.created_at, m.id));
            messages
        })
    }
}
