use axum::{
    Router,
    routing::{get, post, put},
};

use crate::auth::{self, AppState};
use crate::error::{method_not_allowed_fallback, not_found_fallback};
use crate::{categories, messages, orders, payments, products, reviews, users};

/// Assemble the full API router. Authentication is enforced per handler via
/// the [`crate::middleware::AuthUser`] extractor; layering (CORS, request
/// tracing) is the binary's concern.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route(
            "/api/products",
            get(products::list_products).post(products::create_product),
        )
        .route("/api/products/featured", get(products::featured_products))
        .route("/api/products/trending", get(products::trending_products))
        .route("/api/products/search/{query}", get(products::search_products))
        .route(
            "/api/products/{id}",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
        .route(
            "/api/products/{id}/reviews",
            get(reviews::reviews_by_product).post(reviews::create_review),
        )
        .route("/api/categories", get(categories::list_categories))
        .route("/api/categories/{slug}", get(categories::get_category_by_slug))
        .route(
            "/api/categories/{slug}/products",
            get(products::products_by_category),
        )
        .route("/api/sellers", get(users::list_sellers))
        .route(
            "/api/sellers/{id}/products",
            get(products::products_by_seller),
        )
        .route("/api/orders", get(orders::my_orders).post(orders::create_order))
        .route("/api/seller/orders", get(orders::seller_orders))
        .route("/api/orders/{id}/status", put(orders::update_order_status))
        .route("/api/messages", post(messages::send_message))
        .route("/api/messages/{id}", get(messages::conversation))
        .route("/api/messages/{id}/read", put(messages::mark_read))
        .route("/api/users/profile", put(users::update_profile))
        .route("/api/users/{id}", get(users::get_user))
        // Wallet provider webhooks; no session auth by design.
        .route("/api/payments/approve", post(payments::approve_payment))
        .route("/api/payments/complete", post(payments::complete_payment))
        .method_not_allowed_fallback(method_not_allowed_fallback)
        .fallback(not_found_fallback)
        .with_state(state)
}
