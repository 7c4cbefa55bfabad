pub mod mutations;
pub mod queries;
pub mod tables;

use std::sync::RwLock;

use tracing::info;

use crate::tables::Tables;

/// Store errors, mapped onto the HTTP taxonomy by the route layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0} not found")]
    NotFound(&'static str),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// In-memory entity store. One arena table per entity type, all behind a
/// single lock; every operation is a short critical section with no I/O.
///
/// Handed to route handlers through shared state rather than a module-level
/// singleton, so each test gets its own isolated instance. Records live for
/// the process lifetime only.
pub struct Store {
    tables: RwLock<Tables>,
}

impl Store {
    /// Create a store pre-seeded with the launch categories.
    pub fn new() -> Self {
        let mut tables = Tables::default();
        let seeded = tables.seed_categories();
        info!("Store initialized with {} categories", seeded);
        Self {
            tables: RwLock::new(tables),
        }
    }

    pub(crate) fn read<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&Tables) -> T,
    {
        let tables = self.tables.read().unwrap_or_else(|e| e.into_inner());
        f(&tables)
    }

    pub(crate) fn write<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&mut Tables) -> T,
    {
        let mut tables = self.tables.write().unwrap_or_else(|e| e.into_inner());
        f(&mut tables)
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}
