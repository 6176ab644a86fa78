// src/handlers/price.rs
use axum::{extract::State, Json};
use tracing::{error, instrument};

use crate::dtos::price::{GeneratePricesResponse, PriceResponse};
use crate::error::AppError;
use crate::etl;
use crate::models::product::ProductPrice;
use crate::state::AppState;

// GET /prices - List all observed prices
#[instrument(skip(state))]
pub async fn get_prices(State(state): State<AppState>) -> Result<Json<Vec<PriceResponse>>, AppError> {
    let prices = sqlx::query_as::<_, ProductPrice>(
        "SELECT id, product_id, store_id, price, observed_at
         FROM product_prices ORDER BY observed_at DESC, id DESC",
    )
    .fetch_all(&state.db_pool)
    .await
    .map_err(|e| {
        error!(?e, "Failed to fetch prices");
        AppError::from(e)
    })?;

    let response = prices.into_iter().map(PriceResponse::from).collect();
    Ok(Json(response))
}

// POST /prices/generate - Fabricate demo prices for the current catalog
#[instrument(skip(state))]
pub async fn generate_prices(
    State(state): State<AppState>,
) -> Result<Json<GeneratePricesResponse>, AppError> {
    let prices = etl::demo_prices::generate_demo_prices(&state.db_pool)
        .await
        .map_err(|e| {
            error!(?e, "Demo price generation failed");
            AppError::from(e)
        })?;

    Ok(Json(GeneratePricesResponse {
        generated: prices.len(),
    }))
}
