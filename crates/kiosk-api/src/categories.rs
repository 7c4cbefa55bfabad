use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};

use crate::auth::AppState;
use crate::error::ApiError;

pub async fn list_categories(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.store.categories())
}

pub async fn get_category_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let category = state
        .store
        .category_by_slug(&slug)
        .ok_or_else(|| ApiError::not_found("Category"))?;
    Ok(Json(category))
}
