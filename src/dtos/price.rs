// src/dtos/price.rs
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct PriceResponse {
    pub id: i64,
    pub product_id: i64,
    pub store_id: i64,
    pub price: f64,
    pub observed_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct GeneratePricesResponse {
    pub generated: usize,
}

// Convert from Model to Response DTO
impl From<crate::models::product::ProductPrice> for PriceResponse {
    fn from(price: crate::models::product::ProductPrice) -> Self {
        Self {
            id: price.id,
            product_id: price.product_id,
            store_id: price.store_id,
            price: price.price,
            observed_at: price.observed_at,
        }
    }
}
