use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use kiosk_types::api::{CreateOrderRequest, UpdateOrderStatusRequest};
use kiosk_types::models::OrderStatus;

use crate::auth::AppState;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::users::current_user;

/// GET /api/orders — the caller's own purchases.
pub async fn my_orders(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> impl IntoResponse {
    Json(state.store.orders_by_user(claims.sub))
}

/// GET /api/seller/orders — incoming orders for a seller account.
pub async fn seller_orders(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    let user = current_user(&state, &claims)?;
    if !user.is_seller {
        return Err(ApiError::Forbidden("Seller account required".into()));
    }
    Ok(Json(state.store.orders_by_seller(user.id)))
}

pub async fn create_order(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(req): Json<CreateOrderRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let order = state.store.create_order(claims.sub, req.product_id)?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// PUT /api/orders/{id}/status — only the order's seller may transition it.
/// The statuses themselves are unconstrained: any of the four may be set
/// from any other.
pub async fn update_order_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    AuthUser(claims): AuthUser,
    Json(req): Json<UpdateOrderStatusRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let status = OrderStatus::parse(&req.status)
        .ok_or_else(|| ApiError::Validation("Invalid status".into()))?;

    let order = state
        .store
        .order(id)
        .ok_or_else(|| ApiError::not_found("Order"))?;
    if order.seller_id != claims.sub {
        return Err(ApiError::Forbidden(
            "Only the seller can update this order".into(),
        ));
    }

    let updated = state.store.update_order_status(id, status)?;
    Ok(Json(updated))
}
