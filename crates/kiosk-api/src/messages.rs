use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use kiosk_types::api::SendMessageRequest;
use kiosk_types::models::NewMessage;

use crate::auth::AppState;
use crate::error::ApiError;
use crate::middleware::AuthUser;

/// GET /api/messages/{userId} — the caller's conversation with another
/// user, chronological.
pub async fn conversation(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    AuthUser(claims): AuthUser,
) -> impl IntoResponse {
    Json(state.store.messages_between(claims.sub, user_id))
}

pub async fn send_message(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(req): Json<SendMessageRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let message = state.store.create_message(NewMessage {
        sender_id: claims.sub,
        receiver_id: req.receiver_id,
        content: req.content,
    })?;

    Ok((StatusCode::CREATED, Json(message)))
}

/// PUT /api/messages/{id}/read — idempotent; re-marking succeeds.
pub async fn mark_read(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    AuthUser(_claims): AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    state.store.mark_message_read(id)?;
    Ok(StatusCode::NO_CONTENT)
}
