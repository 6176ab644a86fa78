// src/etl/mod.rs
//
// CSV import pipelines and the demo price generator. Each importer follows
// the same shape: load rows from a delimited source, normalize them into
// domain candidates, then upsert the batch inside one transaction.

pub mod demo_prices;
pub mod plu;
pub mod products;
pub mod stores;

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the import pipelines. The web layer converts these into
/// HTTP responses; the ETL core itself never retries or skips rows.
#[derive(Debug, Error)]
pub enum EtlError {
    #[error("CSV file not found: {0}")]
    SourceNotFound(PathBuf),

    #[error("missing required column `{column}`")]
    MissingColumn { column: &'static str },

    #[error("row {row}: invalid timestamp in `{column}`: `{value}` (expected YYYY-MM-DD HH:MM:SS)")]
    InvalidTimestamp {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("malformed address: `{0}`")]
    MalformedAddress(String),

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}
