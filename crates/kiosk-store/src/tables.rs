//! Arena tables: one keyed map per entity type with its own monotonic id
//! counter. Ids start at 1, are unique per entity type and are never reused,
//! including after deletes.

use std::collections::HashMap;

use kiosk_types::models::{Category, Message, Order, Product, Review, User};

/// A single entity arena. Iteration order is unspecified; callers impose
/// their own ordering.
#[derive(Debug)]
pub struct Table<T> {
    rows: HashMap<i64, T>,
    next_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: HashMap::new(),
            next_id: 1,
        }
    }
}

impl<T> Table<T> {
    /// Assign the next id and insert the record built from it.
    pub fn insert_with(&mut self, build: impl FnOnce(i64) -> T) -> &T {
        let id = self.next_id;
        self.next_id += 1;
        self.rows.insert(id, build(id));
        &self.rows[&id]
    }

    pub fn get(&self, id: i64) -> Option<&T> {
        self.rows.get(&id)
    }

    pub fn get_mut(&mut self, id: i64) -> Option<&mut T> {
        self.rows.get_mut(&id)
    }

    /// Remove a record. True if it existed. No cascade: rows in other tables
    /// referencing this id keep their stale reference.
    pub fn remove(&mut self, id: i64) -> bool {
        self.rows.remove(&id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.rows.values()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct Tables {
    pub users: Table<User>,
    pub categories: Table<Category>,
    pub products: Table<Product>,
    pub reviews: Table<Review>,
    pub orders: Table<Order>,
    pub messages: Table<Message>,
}

impl Tables {
    /// Seed the launch categories. Called once at store construction;
    /// categories are read-only afterwards.
    pub fn seed_categories(&mut self) -> usize {
        const SEED: [(&str, &str, &str); 6] = [
            ("Electronics", "laptop", "electronics"),
            ("Fashion", "tshirt", "fashion"),
            ("Home & Garden", "home", "home-garden"),
            ("Sports", "football-ball", "sports"),
            ("Beauty", "spa", "beauty"),
            ("Books", "book", "books"),
        ];

        for (name, icon, slug) in SEED {
            self.categories.insert_with(|id| Category {
                id,
                name: name.to_string(),
                icon: icon.to_string(),
                slug: slug.to_string(),
            });
        }
        SEED.len()
    }
}
