// src/handlers/store.rs
use axum::{extract::State, Json};
use std::path::Path;
use tracing::{error, instrument};

use crate::dtos::import::ImportSummaryResponse;
use crate::dtos::store::{ImportStoresRequest, StoreResponse};
use crate::error::AppError;
use crate::etl;
use crate::models::store::Store;
use crate::state::AppState;

// GET /stores - List all stores
#[instrument(skip(state))]
pub async fn get_stores(State(state): State<AppState>) -> Result<Json<Vec<StoreResponse>>, AppError> {
    let stores = sqlx::query_as::<_, Store>(
        "SELECT id, name, address, city, state, zip_code, is_active, created_at, updated_at
         FROM stores ORDER BY name",
    )
    .fetch_all(&state.db_pool)
    .await
    .map_err(|e| {
        error!(?e, "Failed to fetch stores");
        AppError::from(e)
    })?;

    let response = stores.into_iter().map(StoreResponse::from).collect();
    Ok(Json(response))
}

// POST /stores/import - Import stores from a Google Maps export CSV
#[instrument(skip(state, payload))]
pub async fn import_stores(
    State(state): State<AppState>,
    Json(payload): Json<ImportStoresRequest>,
) -> Result<Json<ImportSummaryResponse>, AppError> {
    let stores = etl::stores::import_gmaps_stores(&state.db_pool, Path::new(&payload.path))
        .await
        .map_err(|e| {
            error!(?e, "Store import failed");
            AppError::from(e)
        })?;

    Ok(Json(ImportSummaryResponse {
        imported: stores.len(),
    }))
}
