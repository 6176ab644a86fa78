use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A grocery item. `upc` holds the PLU code for produce derived from the
/// commodity catalog and is unique when present.
#[derive(Debug, Clone, FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub brand: Option<String>,
    pub upc: Option<String>,
    pub unit: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_active: bool,
}

/// An observed price for a product at a store. Append-only, never updated.
#[derive(Debug, Clone, FromRow)]
pub struct ProductPrice {
    pub id: i64,
    pub product_id: i64,
    pub store_id: i64,
    pub price: f64,
    pub observed_at: DateTime<Utc>,
}

/// A price fact produced by the demo generator, not yet persisted.
#[derive(Debug, Clone)]
pub struct NewProductPrice {
    pub product_id: i64,
    pub store_id: i64,
    pub price: f64,
    pub observed_at: DateTime<Utc>,
}
