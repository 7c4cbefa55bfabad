use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use kiosk_types::api::CreateProductRequest;
use kiosk_types::models::{NewProduct, ProductPatch};

use crate::auth::AppState;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::users::current_user;

pub async fn list_products(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.store.products())
}

pub async fn featured_products(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.store.featured_products())
}

pub async fn trending_products(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.store.trending_products())
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let product = state
        .store
        .product(id)
        .ok_or_else(|| ApiError::not_found("Product"))?;
    Ok(Json(product))
}

/// GET /api/categories/{categoryId}/products — listings in a category,
/// addressed by numeric id. An unknown id yields an empty list, not a 404.
pub async fn products_by_category(
    State(state): State<AppState>,
    Path(category_id): Path<i64>,
) -> impl IntoResponse {
    Json(state.store.products_by_category(category_id))
}

pub async fn products_by_seller(
    State(state): State<AppState>,
    Path(seller_id): Path<i64>,
) -> impl IntoResponse {
    Json(state.store.products_by_seller(seller_id))
}

pub async fn search_products(
    State(state): State<AppState>,
    Path(query): Path<String>,
) -> impl IntoResponse {
    Json(state.store.search_products(&query))
}

/// POST /api/products — seller accounts only. The seller id always comes
/// from the token, never the body.
pub async fn create_product(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(req): Json<CreateProductRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = current_user(&state, &claims)?;
    if !user.is_seller {
        return Err(ApiError::Forbidden("Seller account required".into()));
    }

    let product = state.store.create_product(NewProduct {
        name: req.name,
        description: req.description,
        price: req.price,
        images: req.images,
        category_id: req.category_id,
        seller_id: user.id,
        condition: req.condition,
        featured: req.featured,
        trending: req.trending,
    })?;

    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    AuthUser(claims): AuthUser,
    Json(patch): Json<ProductPatch>,
) -> Result<impl IntoResponse, ApiError> {
    let product = state.store.update_product(id, patch, claims.sub)?;
    Ok(Json(product))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    AuthUser(claims): AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    state.store.delete_product(id, claims.sub)?;
    Ok(StatusCode::NO_CONTENT)
}
