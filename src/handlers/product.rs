// src/handlers/product.rs
use axum::{
    extract::{Query, State},
    Json,
};
use std::path::Path;
use tracing::{error, instrument};

use crate::dtos::import::ImportSummaryResponse;
use crate::dtos::product::{ImportPluRequest, ProductResponse};
use crate::error::AppError;
use crate::etl;
use crate::models::product::Product;
use crate::state::AppState;

// GET /products - List all products
#[instrument(skip(state))]
pub async fn get_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductResponse>>, AppError> {
    let products = sqlx::query_as::<_, Product>(
        "SELECT id, name, brand, upc, unit, created_at, updated_at, is_active
         FROM products ORDER BY name",
    )
    .fetch_all(&state.db_pool)
    .await
    .map_err(|e| {
        error!(?e, "Failed to fetch products");
        AppError::from(e)
    })?;

    let response = products.into_iter().map(ProductResponse::from).collect();
    Ok(Json(response))
}

// POST /products/import-plu?path=... - Import PLU commodities from CSV
// (defaults to data/commodities.csv when no path is given)
#[instrument(skip(state, params))]
pub async fn import_plu(
    State(state): State<AppState>,
    Query(params): Query<ImportPluRequest>,
) -> Result<Json<ImportSummaryResponse>, AppError> {
    let path = params.path.as_deref().map(Path::new);

    let commodities = etl::plu::import_plu_commodities(&state.db_pool, path)
        .await
        .map_err(|e| {
            error!(?e, "PLU import failed");
            AppError::from(e)
        })?;

    Ok(Json(ImportSummaryResponse {
        imported: commodities.len(),
    }))
}

// POST /products/import-plu-products - Derive products from all PLU commodities
#[instrument(skip(state))]
pub async fn import_plu_products(
    State(state): State<AppState>,
) -> Result<Json<ImportSummaryResponse>, AppError> {
    let products = etl::products::import_all_plu_to_products(&state.db_pool)
        .await
        .map_err(|e| {
            error!(?e, "Product derivation failed");
            AppError::from(e)
        })?;

    Ok(Json(ImportSummaryResponse {
        imported: products.len(),
    }))
}
