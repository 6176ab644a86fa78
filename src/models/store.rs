use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A grocery store location. One row per (name, address) pair.
#[derive(Debug, Clone, FromRow)]
pub struct Store {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A store candidate produced by the importer, not yet persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStore {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}
