use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use kiosk_types::api::CreateReviewRequest;
use kiosk_types::models::NewReview;

use crate::auth::AppState;
use crate::error::ApiError;
use crate::middleware::AuthUser;

pub async fn reviews_by_product(
    State(state): State<AppState>,
    Path(product_id): Path<i64>,
) -> impl IntoResponse {
    Json(state.store.reviews_by_product(product_id))
}

/// POST /api/products/{productId}/reviews — any authenticated user may
/// review, repeatedly; there is no per-user uniqueness constraint.
pub async fn create_review(
    State(state): State<AppState>,
    Path(product_id): Path<i64>,
    AuthUser(claims): AuthUser,
    Json(req): Json<CreateReviewRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let review = state.store.create_review(NewReview {
        product_id,
        user_id: claims.sub,
        rating: req.rating,
        comment: req.comment,
    })?;

    Ok((StatusCode::CREATED, Json(review)))
}
