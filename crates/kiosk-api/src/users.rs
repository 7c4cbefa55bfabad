use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};

use kiosk_types::api::{Claims, UserResponse};
use kiosk_types::models::{User, UserPatch};

use crate::auth::AppState;
use crate::error::ApiError;
use crate::middleware::AuthUser;

/// Resolve the authenticated caller's full record. A valid token for a user
/// that no longer exists reads as unauthenticated.
pub(crate) fn current_user(state: &AppState, claims: &Claims) -> Result<User, ApiError> {
    state.store.user(claims.sub).ok_or(ApiError::Unauthorized)
}

/// GET /api/users/{id} — public profile, password stripped.
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .store
        .user(id)
        .ok_or_else(|| ApiError::not_found("User"))?;
    Ok(Json(UserResponse::from(user)))
}

/// PUT /api/users/profile — merge an explicit patch into the caller's
/// profile. Unknown fields are rejected at deserialization.
pub async fn update_profile(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(patch): Json<UserPatch>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.store.update_user(claims.sub, patch)?;
    Ok(Json(UserResponse::from(user)))
}

/// GET /api/sellers — every seller account, passwords stripped.
pub async fn list_sellers(State(state): State<AppState>) -> impl IntoResponse {
    let sellers: Vec<UserResponse> = state
        .store
        .sellers()
        .into_iter()
        .map(UserResponse::from)
        .collect();
    Json(sellers)
}
