// src/handlers/product.rs
use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderName, StatusCode},
    Json,
};
use tracing::instrument;

use crate::dtos::product::{
    CreateProductRequest, ListProductsParams, ProductListResponse, ProductResponse,
    UpdateProductRequest,
};
use crate::error::AppError;
use crate::services::product::ProductService;
use crate::state::AppState;
use crate::validation;

// GET /products - paged list with optional search
#[instrument(skip(state))]
pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<ListProductsParams>,
) -> Result<Json<ProductListResponse>, AppError> {
    let errors = validation::validate_list_params(&params);
    if !errors.is_empty() {
        return Err(AppError::validation(errors));
    }

    let service = ProductService::postgres(state.db_pool.clone());
    let page = service
        .list(
            params.page_number,
            params.page_size,
            params.search_term.as_deref(),
        )
        .await?;
    Ok(Json(page))
}

// GET /products/:id - Get single product with its items
#[instrument(skip(state))]
pub async fn get_product(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<ProductResponse>, AppError> {
    let service = ProductService::postgres(state.db_pool.clone());
    Ok(Json(service.get_by_id(id).await?))
}

// POST /products - Create new product
#[instrument(skip(state, payload))]
pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<CreateProductRequest>,
) -> Result<(StatusCode, [(HeaderName, String); 1], Json<ProductResponse>), AppError> {
    let errors = validation::validate_create(&payload);
    if !errors.is_empty() {
        return Err(AppError::validation(errors));
    }

    let service = ProductService::postgres(state.db_pool.clone());
    let created = service.create(payload).await?;
    let location = format!("/api/products/{}", created.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(created),
    ))
}

// PUT /products/:id - Partial update; absent fields stay unchanged
#[instrument(skip(state, payload))]
pub async fn update_product(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Json(payload): Json<UpdateProductRequest>,
) -> Result<Json<ProductResponse>, AppError> {
    let errors = validation::validate_update(&payload);
    if !errors.is_empty() {
        return Err(AppError::validation(errors));
    }

    let service = ProductService::postgres(state.db_pool.clone());
    Ok(Json(service.update(id, payload).await?))
}

// DELETE /products/:id - Delete product (items cascade)
#[instrument(skip(state))]
pub async fn delete_product(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    let service = ProductService::postgres(state.db_pool.clone());
    if service.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found(format!("Product with ID {id} not found")))
    }
}

// GET /products/:id/exists - Cheap existence probe
#[instrument(skip(state))]
pub async fn product_exists(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<bool>, AppError> {
    let service = ProductService::postgres(state.db_pool.clone());
    Ok(Json(service.exists(id).await?))
}
