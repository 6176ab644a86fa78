use chrono::NaiveDateTime;
use sqlx::FromRow;

/// A PLU commodity from the IFPS produce catalog. One row per PLU code.
///
/// Timestamps come from the CSV source and carry no timezone, so they stay
/// naive here.
#[derive(Debug, Clone, FromRow)]
pub struct PluCommodity {
    pub id: i64,
    pub plu: String,
    #[sqlx(rename = "type")]
    pub plu_type: String,
    pub category: String,
    pub commodity: String,
    pub variety: String,
    pub size: String,
    pub measures_na: Option<String>,
    pub measures_row: Option<String>,
    pub restrictions: Option<String>,
    pub botanical: Option<String>,
    pub aka: Option<String>,
    pub status: String,
    pub link: Option<String>,
    pub notes: Option<String>,
    pub updated_by: String,
    pub updated_at: NaiveDateTime,
    pub created_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
    pub language: String,
}

/// A commodity candidate parsed from CSV, not yet persisted.
#[derive(Debug, Clone)]
pub struct NewPluCommodity {
    pub plu: String,
    pub plu_type: String,
    pub category: String,
    pub commodity: String,
    pub variety: String,
    pub size: String,
    pub measures_na: Option<String>,
    pub measures_row: Option<String>,
    pub restrictions: Option<String>,
    pub botanical: Option<String>,
    pub aka: Option<String>,
    pub status: String,
    pub link: Option<String>,
    pub notes: Option<String>,
    pub updated_by: String,
    pub updated_at: NaiveDateTime,
    pub created_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
    pub language: String,
}
