//! HTTP route layer: axum handlers over the kiosk store, JWT auth, and the
//! wallet payment integration. A request hits a handler, the handler calls
//! into the store (or the payment client) and the result comes back as JSON.

pub mod auth;
pub mod categories;
pub mod error;
pub mod messages;
pub mod middleware;
pub mod orders;
pub mod payments;
pub mod products;
pub mod reviews;
pub mod router;
pub mod users;

pub use auth::{AppState, AppStateInner};
pub use router::create_router;
