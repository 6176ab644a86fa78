// src/dtos/import.rs
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ImportSummaryResponse {
    pub imported: usize,
}
