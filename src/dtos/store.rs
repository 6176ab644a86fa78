// src/dtos/store.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ImportStoresRequest {
    pub path: String,
}

#[derive(Debug, Serialize)]
pub struct StoreResponse {
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

// Convert from Model to Response DTO
impl From<crate::models::store::Store> for StoreResponse {
    fn from(store: crate::models::store::Store) -> Self {
        Self {
            id: store.id,
            name: store.name,
            address: store.address,
            city: store.city,
            state: store.state,
            zip_code: store.zip_code,
            is_active: store.is_active,
            created_at: store.created_at,
            updated_at: store.updated_at,
        }
    }
}
