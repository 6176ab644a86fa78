// src/etl/stores.rs
//
// Store importer: Google Maps place export CSV -> stores rows, upserted by
// (name, address).

use std::path::Path;

use chrono::Utc;
use serde::Deserialize;
use sqlx::SqlitePool;
use tracing::{info, instrument};

use crate::etl::EtlError;
use crate::models::store::{NewStore, Store};

const REQUIRED_COLUMNS: &[&str] = &["name", "address"];

const UPSERT_STORE: &str = "\
    INSERT INTO stores (name, address, city, state, zip_code, is_active, created_at, updated_at)
    VALUES (?, ?, ?, ?, ?, TRUE, ?, ?)
    ON CONFLICT (name, address) DO UPDATE SET
        city = excluded.city,
        state = excluded.state,
        zip_code = excluded.zip_code,
        updated_at = excluded.updated_at
    RETURNING id, name, address, city, state, zip_code, is_active, created_at, updated_at";

/// A row from a Google Maps place export. Extra columns are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct GmapsStoreRecord {
    pub name: String,
    pub address: String,
}

/// Read every row of the export in input order. No filtering.
pub fn load_gmaps_stores(csv_path: &Path) -> Result<Vec<GmapsStoreRecord>, EtlError> {
    if !csv_path.exists() {
        return Err(EtlError::SourceNotFound(csv_path.to_path_buf()));
    }

    let mut reader = csv::Reader::from_path(csv_path)?;
    let headers = reader.headers()?.clone();
    for &column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(EtlError::MissingColumn { column });
        }
    }

    let mut records = Vec::new();
    for result in reader.deserialize::<GmapsStoreRecord>() {
        records.push(result?);
    }
    Ok(records)
}

/// Derive street/city/state/zip from the export's combined address string.
///
/// The export writes `street, city, STATE ZIP, country`. City and state/zip
/// are addressed from the end so extra leading segments (suite numbers and
/// the like) do not shift them. Addresses that do not fit this shape are
/// rejected, not guessed at.
pub fn convert_gmaps_store(record: &GmapsStoreRecord) -> Result<NewStore, EtlError> {
    let parts: Vec<&str> = record.address.split(',').collect();
    if parts.len() < 3 {
        return Err(EtlError::MalformedAddress(record.address.clone()));
    }

    let state_zip: Vec<&str> = parts[parts.len() - 2].split_whitespace().collect();
    if state_zip.len() < 2 {
        return Err(EtlError::MalformedAddress(record.address.clone()));
    }

    Ok(NewStore {
        name: record.name.clone(),
        address: parts[0].trim().to_string(),
        city: parts[parts.len() - 3].trim().to_string(),
        state: state_zip[0].to_string(),
        zip_code: state_zip[1].chars().take(5).collect(),
    })
}

/// Upsert a batch of stores, keyed by (name, address). Existing rows keep
/// their id, name, address and created_at; city, state and zip_code are
/// overwritten and updated_at bumped. One commit for the whole batch.
pub async fn save_stores(pool: &SqlitePool, stores: &[NewStore]) -> Result<Vec<Store>, EtlError> {
    if stores.is_empty() {
        return Ok(Vec::new());
    }

    let mut tx = pool.begin().await?;
    let mut saved = Vec::with_capacity(stores.len());
    for store in stores {
        let now = Utc::now();
        let row = sqlx::query_as::<_, Store>(UPSERT_STORE)
            .bind(&store.name)
            .bind(&store.address)
            .bind(&store.city)
            .bind(&store.state)
            .bind(&store.zip_code)
            .bind(now)
            .bind(now)
            .fetch_one(&mut *tx)
            .await?;
        saved.push(row);
    }
    tx.commit().await?;

    Ok(saved)
}

/// Full pipeline: load the export, normalize every record, upsert the batch.
/// Safe to run repeatedly over the same file.
#[instrument(skip(pool))]
pub async fn import_gmaps_stores(
    pool: &SqlitePool,
    csv_path: &Path,
) -> Result<Vec<Store>, EtlError> {
    let records = load_gmaps_stores(csv_path)?;
    let stores = records
        .iter()
        .map(convert_gmaps_store)
        .collect::<Result<Vec<_>, _>>()?;
    let saved = save_stores(pool, &stores).await?;
    info!("Imported {} stores from {}", saved.len(), csv_path.display());
    Ok(saved)
}
