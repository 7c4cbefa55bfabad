//! Write operations. Each call validates first and only then touches the
//! tables, so a failed call leaves the store exactly as it was.

use chrono::Utc;
use kiosk_types::models::{
    Message, NewMessage, NewProduct, NewReview, NewUser, Order, OrderStatus, Product, ProductPatch,
    Review, User, UserPatch,
};

use crate::{Store, StoreError, StoreResult};

impl Store {
    // -- Users --

    /// Register a user. Username and email must be unused.
    pub fn create_user(&self, new: NewUser) -> StoreResult<User> {
        self.write(|t| {
            if t.users.iter().any(|u| u.username == new.username) {
                return Err(StoreError::Validation("Username already taken".into()));
            }
            if t.users.iter().any(|u| u.email == new.email) {
                return Err(StoreError::Validation("Email already registered".into()));
            }

            Ok(t.users
                .insert_with(|id| User {
                    id,
                    username: new.username,
                    password: new.password,
                    email: new.email,
                    name: new.name,
                    avatar: new.avatar,
                    bio: new.bio,
                    is_seller: new.is_seller,
                })
                .clone())
        })
    }

    /// Merge a profile patch. Username/email uniqueness is enforced at
    /// registration only, not re-checked here.
    pub fn update_user(&self, id: i64, patch: UserPatch) -> StoreResult<User> {
        self.write(|t| {
            let user = t.users.get_mut(id).ok_or(StoreError::NotFound("User"))?;

            if let Some(name) = patch.name {
                user.name = name;
            }
            if let Some(email) = patch.email {
                user.email = email;
            }
            if let Some(bio) = patch.bio {
                user.bio = Some(bio);
            }
            if let Some(avatar) = patch.avatar {
                user.avatar = Some(avatar);
            }
            if let Some(is_seller) = patch.is_seller {
                user.is_seller = is_seller;
            }

            Ok(user.clone())
        })
    }

    // -- Products --

    /// Create a listing. The seller must exist and be a seller account, the
    /// category must exist, images must be non-empty and the price positive.
    pub fn create_product(&self, new: NewProduct) -> StoreResult<Product> {
        self.write(|t| {
            let seller = t
                .users
                .get(new.seller_id)
                .ok_or(StoreError::NotFound("Seller"))?;
            if !seller.is_seller {
                return Err(StoreError::Forbidden("Seller account required".into()));
            }
            if t.categories.get(new.category_id).is_none() {
                return Err(StoreError::NotFound("Category"));
            }
            if new.images.is_empty() {
                return Err(StoreError::Validation(
                    "At least one product image is required".into(),
                ));
            }
            if new.price <= 0.0 {
                return Err(StoreError::Validation("Price must be greater than zero".into()));
            }

            Ok(t.products
                .insert_with(|id| Product {
                    id,
                    name: new.name,
                    description: new.description,
                    price: new.price,
                    images: new.images,
                    category_id: new.category_id,
                    seller_id: new.seller_id,
                    condition: new.condition,
                    featured: new.featured,
                    trending: new.trending,
                    created_at: Utc::now(),
                })
                .clone())
        })
    }

    /// Merge a patch into an owned listing. Creation invariants are not
    /// re-validated on update.
    pub fn update_product(
        &self,
        id: i64,
        patch: ProductPatch,
        caller_id: i64,
    ) -> StoreResult<Product> {
        self.write(|t| {
            let product = t
                .products
                .get_mut(id)
                .ok_or(StoreError::NotFound("Product"))?;
            if product.seller_id != caller_id {
                return Err(StoreError::Forbidden(
                    "You don't have permission to update this product".into(),
                ));
            }

            if let Some(name) = patch.name {
                product.name = name;
            }
            if let Some(description) = patch.description {
                product.description = description;
            }
            if let Some(price) = patch.price {
                product.price = price;
            }
            if let Some(images) = patch.images {
                product.images = images;
            }
            if let Some(category_id) = patch.category_id {
                product.category_id = category_id;
            }
            if let Some(condition) = patch.condition {
                product.condition = condition;
            }
            if let Some(featured) = patch.featured {
                product.featured = featured;
            }
            if let Some(trending) = patch.trending {
                product.trending = trending;
            }

            Ok(product.clone())
        })
    }

    /// Delete an owned listing. Orders and reviews referencing the product
    /// keep their stale product id (no cascade).
    pub fn delete_product(&self, id: i64, caller_id: i64) -> StoreResult<()> {
        self.write(|t| {
            let product = t.products.get(id).ok_or(StoreError::NotFound("Product"))?;
            if product.seller_id != caller_id {
                return Err(StoreError::Forbidden(
                    "You don't have permission to delete this product".into(),
                ));
            }
            t.products.remove(id);
            Ok(())
        })
    }

    // -- Reviews --

    /// Attach a review to an existing product. Rating must be 1..=5. There is
    /// no per-user uniqueness: repeat reviews are accepted.
    pub fn create_review(&self, new: NewReview) -> StoreResult<Review> {
        self.write(|t| {
            if t.products.get(new.product_id).is_none() {
                return Err(StoreError::NotFound("Product"));
            }
            if !(1..=5).contains(&new.rating) {
                return Err(StoreError::Validation(
                    "Rating must be between 1 and 5".into(),
                ));
            }

            Ok(t.reviews
                .insert_with(|id| Review {
                    id,
                    product_id: new.product_id,
                    user_id: new.user_id,
                    rating: new.rating,
                    comment: new.comment,
                    created_at: Utc::now(),
                })
                .clone())
        })
    }

    // -- Orders --

    /// Place an order. The seller id is derived from the product; the order
    /// starts out pending.
    pub fn create_order(&self, user_id: i64, product_id: i64) -> StoreResult<Order> {
        self.write(|t| {
            let product = t
                .products
                .get(product_id)
                .ok_or(StoreError::NotFound("Product"))?;
            let seller_id = product.seller_id;

            Ok(t.orders
                .insert_with(|id| Order {
                    id,
                    user_id,
                    product_id,
                    seller_id,
                    status: OrderStatus::Pending,
                    created_at: Utc::now(),
                })
                .clone())
        })
    }

    /// Set an order's status. Any of the four statuses may be set at any
    /// time; there is deliberately no transition table here.
    pub fn update_order_status(&self, order_id: i64, status: OrderStatus) -> StoreResult<Order> {
        self.write(|t| {
            let order = t
                .orders
                .get_mut(order_id)
                .ok_or(StoreError::NotFound("Order"))?;
            order.status = status;
            Ok(order.clone())
        })
    }

    // -- Messages --

    /// Send a message. Both ends of the conversation must exist.
    pub fn create_message(&self, new: NewMessage) -> StoreResult<Message> {
        self.write(|t| {
            if t.users.get(new.sender_id).is_none() {
                return Err(StoreError::NotFound("Sender"));
            }
            if t.users.get(new.receiver_id).is_none() {
                return Err(StoreError::NotFound("Receiver"));
            }

            Ok(t.messages
                .insert_with(|id| Message {
                    id,
                    sender_id: new.sender_id,
                    receiver_id: new.receiver_id,
                    content: new.content,
                    read: false,
                    created_at: Utc::now(),
                })
                .clone())
        })
    }

    /// Flip a message to read. Idempotent: marking an already-read message
    /// succeeds again.
    pub fn mark_message_read(&self, id: i64) -> StoreResult<()> {
        self.write(|t| {
            let message = t
                .messages
                .get_mut(id)
                .ok_or(StoreError::NotFound("Message"))?;
            message.read = true;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use kiosk_types::models::Condition;

    use super::*;

    fn seller(store: &Store) -> User {
        store
            .create_user(NewUser {
                username: "stella".into(),
                password: "hash".into(),
                email: "stella@example.com".into(),
                name: "Stella".into(),
                avatar: None,
                bio: None,
                is_seller: true,
            })
            .unwrap()
    }

    fn buyer(store: &Store) -> User {
        store
            .create_user(NewUser {
                username: "bram".into(),
                password: "hash".into(),
                email: "bram@example.com".into(),
                name: "Bram".into(),
                avatar: None,
                bio: None,
                is_seller: false,
            })
            .unwrap()
    }

    fn listing(store: &Store, seller_id: i64) -> Product {
        store
            .create_product(NewProduct {
                name: "Record player".into(),
                description: "Belt drive, serviced".into(),
                price: 9.99,
                images: vec!["http://x/1.png".into()],
                category_id: 1,
                seller_id,
                condition: Condition::Good,
                featured: false,
                trending: false,
            })
            .unwrap()
    }

    #[test]
    fn created_ids_increase_per_entity_type() {
        let store = Store::new();
        let s = seller(&store);
        let b = buyer(&store);
        assert!(b.id > s.id);

        let p1 = listing(&store, s.id);
        let p2 = listing(&store, s.id);
        assert!(p2.id > p1.id);
        // Product ids are independent of the user counter.
        assert_eq!(p1.id, 1);
    }

    #[test]
    fn duplicate_username_or_email_is_rejected() {
        let store = Store::new();
        seller(&store);

        let dup = store.create_user(NewUser {
            username: "stella".into(),
            password: "hash".into(),
            email: "other@example.com".into(),
            name: "Other".into(),
            avatar: None,
            bio: None,
            is_seller: false,
        });
        assert!(matches!(dup, Err(StoreError::Validation(_))));

        let dup_email = store.create_user(NewUser {
            username: "other".into(),
            password: "hash".into(),
            email: "stella@example.com".into(),
            name: "Other".into(),
            avatar: None,
            bio: None,
            is_seller: false,
        });
        assert!(matches!(dup_email, Err(StoreError::Validation(_))));
    }

    #[test]
    fn product_requires_images_and_positive_price() {
        let store = Store::new();
        let s = seller(&store);

        let no_images = store.create_product(NewProduct {
            name: "Ghost".into(),
            description: "No pictures".into(),
            price: 5.0,
            images: vec![],
            category_id: 1,
            seller_id: s.id,
            condition: Condition::New,
            featured: false,
            trending: false,
        });
        assert!(matches!(no_images, Err(StoreError::Validation(_))));

        let free = store.create_product(NewProduct {
            name: "Freebie".into(),
            description: "Zero priced".into(),
            price: 0.0,
            images: vec!["http://x/1.png".into()],
            category_id: 1,
            seller_id: s.id,
            condition: Condition::New,
            featured: false,
            trending: false,
        });
        assert!(matches!(free, Err(StoreError::Validation(_))));

        assert!(store.products().is_empty());
    }

    #[test]
    fn non_sellers_cannot_list_products() {
        let store = Store::new();
        let b = buyer(&store);

        let attempt = store.create_product(NewProduct {
            name: "Nope".into(),
            description: "Buyer listing".into(),
            price: 1.0,
            images: vec!["http://x/1.png".into()],
            category_id: 1,
            seller_id: b.id,
            condition: Condition::Fair,
            featured: false,
            trending: false,
        });
        assert!(matches!(attempt, Err(StoreError::Forbidden(_))));
        assert!(store.products().is_empty());
    }

    #[test]
    fn only_the_owner_may_update_or_delete() {
        let store = Store::new();
        let s = seller(&store);
        let b = buyer(&store);
        let product = listing(&store, s.id);

        let patch = ProductPatch {
            price: Some(1.0),
            ..ProductPatch::default()
        };
        let update = store.update_product(product.id, patch, b.id);
        assert!(matches!(update, Err(StoreError::Forbidden(_))));

        let delete = store.delete_product(product.id, b.id);
        assert!(matches!(delete, Err(StoreError::Forbidden(_))));

        // Store unchanged after the failed attempts.
        let unchanged = store.product(product.id).unwrap();
        assert_eq!(unchanged.price, 9.99);
    }

    #[test]
    fn update_merges_only_set_fields() {
        let store = Store::new();
        let s = seller(&store);
        let product = listing(&store, s.id);

        let patch = ProductPatch {
            price: Some(19.99),
            trending: Some(true),
            ..ProductPatch::default()
        };
        let updated = store.update_product(product.id, patch, s.id).unwrap();
        assert_eq!(updated.price, 19.99);
        assert!(updated.trending);
        assert_eq!(updated.name, "Record player");
        assert_eq!(updated.images, product.images);
    }

    #[test]
    fn empty_search_matches_every_product() {
        let store = Store::new();
        let s = seller(&store);
        listing(&store, s.id);
        listing(&store, s.id);

        assert_eq!(store.search_products("").len(), 2);
        assert_eq!(store.search_products("RECORD").len(), 2);
        assert_eq!(store.search_products("serviced").len(), 2);
        assert!(store.search_products("tuba").is_empty());
    }

    #[test]
    fn deleting_a_product_leaves_orders_pointing_at_it() {
        let store = Store::new();
        let s = seller(&store);
        let b = buyer(&store);
        let product = listing(&store, s.id);

        let order = store.create_order(b.id, product.id).unwrap();
        store.delete_product(product.id, s.id).unwrap();

        assert!(store.product(product.id).is_none());
        let stale = store.order(order.id).unwrap();
        assert_eq!(stale.product_id, product.id);
    }

    #[test]
    fn orders_derive_seller_and_start_pending() {
        let store = Store::new();
        let s = seller(&store);
        let b = buyer(&store);
        let product = listing(&store, s.id);

        let order = store.create_order(b.id, product.id).unwrap();
        assert_eq!(order.seller_id, s.id);
        assert_eq!(order.status, OrderStatus::Pending);

        let mine = store.orders_by_user(b.id);
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].product_id, product.id);
    }

    #[test]
    fn any_status_transition_is_accepted() {
        let store = Store::new();
        let s = seller(&store);
        let b = buyer(&store);
        let product = listing(&store, s.id);
        let order = store.create_order(b.id, product.id).unwrap();

        store
            .update_order_status(order.id, OrderStatus::Delivered)
            .unwrap();
        // Backwards transition is permitted; there is no transition table.
        let rewound = store
            .update_order_status(order.id, OrderStatus::Pending)
            .unwrap();
        assert_eq!(rewound.status, OrderStatus::Pending);
    }

    #[test]
    fn duplicate_reviews_from_one_user_are_accepted() {
        let store = Store::new();
        let s = seller(&store);
        let b = buyer(&store);
        let product = listing(&store, s.id);

        for _ in 0..2 {
            store
                .create_review(NewReview {
                    product_id: product.id,
                    user_id: b.id,
                    rating: 5,
                    comment: Some("great".into()),
                })
                .unwrap();
        }
        assert_eq!(store.reviews_by_product(product.id).len(), 2);
    }

    #[test]
    fn review_rating_is_bounded() {
        let store = Store::new();
        let s = seller(&store);
        let b = buyer(&store);
        let product = listing(&store, s.id);

        for rating in [0, 6] {
            let rejected = store.create_review(NewReview {
                product_id: product.id,
                user_id: b.id,
                rating,
                comment: None,
            });
            assert!(matches!(rejected, Err(StoreError::Validation(_))));
        }
        assert!(store.reviews_by_product(product.id).is_empty());
    }

    #[test]
    fn message_threads_are_symmetric_and_chronological() {
        let store = Store::new();
        let a = seller(&store);
        let b = buyer(&store);

        for content in ["first", "second", "third"] {
            let (from, to) = if content == "second" {
                (b.id, a.id)
            } else {
                (a.id, b.id)
            };
            store
                .create_message(NewMessage {
                    sender_id: from,
                    receiver_id: to,
                    content: content.into(),
                })
                .unwrap();
        }

        let thread = store.messages_between(a.id, b.id);
        let mirrored = store.messages_between(b.id, a.id);
        let contents: Vec<&str> = thread.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, ["first", "second", "third"]);
        assert_eq!(
            thread.iter().map(|m| m.id).collect::<Vec<_>>(),
            mirrored.iter().map(|m| m.id).collect::<Vec<_>>()
        );
    }

    #[test]
    fn mark_message_read_is_idempotent() {
        let store = Store::new();
        let a = seller(&store);
        let b = buyer(&store);
        let message = store
            .create_message(NewMessage {
                sender_id: a.id,
                receiver_id: b.id,
                content: "ping".into(),
            })
            .unwrap();
        assert!(!message.read);

        store.mark_message_read(message.id).unwrap();
        store.mark_message_read(message.id).unwrap();
        assert!(store.messages_between(a.id, b.id)[0].read);
    }

    #[test]
    fn user_patch_can_promote_to_seller() {
        let store = Store::new();
        let b = buyer(&store);

        let patch = UserPatch {
            is_seller: Some(true),
            bio: Some("Now selling".into()),
            ..UserPatch::default()
        };
        let updated = store.update_user(b.id, patch).unwrap();
        assert!(updated.is_seller);
        assert_eq!(updated.bio.as_deref(), Some("Now selling"));
        assert_eq!(updated.username, "bram");
    }
}
