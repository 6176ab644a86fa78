// src/etl/plu.rs
//
// PLU commodity importer: IFPS produce catalog CSV -> plu_commodities rows,
// upserted by PLU code with full-overwrite semantics.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use serde::Deserialize;
use sqlx::SqlitePool;
use tracing::{info, instrument};

use crate::etl::EtlError;
use crate::models::plu::{NewPluCommodity, PluCommodity};

/// Catalog location used when the caller gives no path.
pub const DEFAULT_COMMODITIES_CSV: &str = "data/commodities.csv";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Columns the catalog header must carry, exact names. Checked up front so a
/// schema drift reports the offending column instead of failing row by row.
const REQUIRED_COLUMNS: &[&str] = &[
    "Plu",
    "Type",
    "Category",
    "Commodity",
    "Variety",
    "Size",
    "Status",
    "Updated_by",
    "Updated_at",
    "Created_at",
    "Language",
];

const UPSERT_PLU: &str = "\
    INSERT INTO plu_commodities
        (plu, type, category, commodity, variety, size, measures_na, measures_row,
         restrictions, botanical, aka, status, link, notes, updated_by, updated_at,
         created_at, deleted_at, language)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
    ON CONFLICT (plu) DO UPDATE SET
        type = excluded.type,
        category = excluded.category,
        commodity = excluded.commodity,
        variety = excluded.variety,
        size = excluded.size,
        measures_na = excluded.measures_na,
        measures_row = excluded.measures_row,
        restrictions = excluded.restrictions,
        botanical = excluded.botanical,
        aka = excluded.aka,
        status = excluded.status,
        link = excluded.link,
        notes = excluded.notes,
        updated_by = excluded.updated_by,
        updated_at = excluded.updated_at,
        created_at = excluded.created_at,
        deleted_at = excluded.deleted_at,
        language = excluded.language
    RETURNING id, plu, type, category, commodity, variety, size, measures_na,
        measures_row, restrictions, botanical, aka, status, link, notes,
        updated_by, updated_at, created_at, deleted_at, language";

/// A catalog row as the CSV carries it, before timestamps are parsed.
/// Empty optional cells deserialize to None.
#[derive(Debug, Deserialize)]
struct RawPluRow {
    #[serde(rename = "Plu")]
    plu: String,
    #[serde(rename = "Type")]
    plu_type: String,
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Commodity")]
    commodity: String,
    #[serde(rename = "Variety")]
    variety: String,
    #[serde(rename = "Size")]
    size: String,
    #[serde(rename = "Measures_na", default)]
    measures_na: Option<String>,
    #[serde(rename = "Measures_row", default)]
    measures_row: Option<String>,
    #[serde(rename = "Restrictions", default)]
    restrictions: Option<String>,
    #[serde(rename = "Botanical", default)]
    botanical: Option<String>,
    #[serde(rename = "Aka", default)]
    aka: Option<String>,
    #[serde(rename = "Status")]
    status: String,
    #[serde(rename = "Link", default)]
    link: Option<String>,
    #[serde(rename = "Notes", default)]
    notes: Option<String>,
    #[serde(rename = "Updated_by")]
    updated_by: String,
    #[serde(rename = "Updated_at")]
    updated_at: String,
    #[serde(rename = "Created_at")]
    created_at: String,
    #[serde(rename = "Deleted_at", default)]
    deleted_at: Option<String>,
    #[serde(rename = "Language")]
    language: String,
}

fn parse_timestamp(
    row: usize,
    column: &'static str,
    value: &str,
) -> Result<NaiveDateTime, EtlError> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT).map_err(|_| {
        EtlError::InvalidTimestamp {
            row,
            column,
            value: value.to_string(),
        }
    })
}

fn convert_row(row: usize, raw: RawPluRow) -> Result<NewPluCommodity, EtlError> {
    let updated_at = parse_timestamp(row, "Updated_at", &raw.updated_at)?;
    let created_at = parse_timestamp(row, "Created_at", &raw.created_at)?;
    let deleted_at = match &raw.deleted_at {
        Some(value) => Some(parse_timestamp(row, "Deleted_at", value)?),
        None => None,
    };

    Ok(NewPluCommodity {
        plu: raw.plu,
        plu_type: raw.plu_type,
        category: raw.category,
        commodity: raw.commodity,
        variety: raw.variety,
        size: raw.size,
        measures_na: raw.measures_na,
        measures_row: raw.measures_row,
        restrictions: raw.restrictions,
        botanical: raw.botanical,
        aka: raw.aka,
        status: raw.status,
        link: raw.link,
        notes: raw.notes,
        updated_by: raw.updated_by,
        updated_at,
        created_at,
        deleted_at,
        language: raw.language,
    })
}

/// Load commodity candidates from the catalog CSV, in row order.
///
/// Fail-fast: the first missing required column or unparseable timestamp
/// aborts the whole load. Row numbers in errors are 1-based data rows.
pub fn load_plu_commodities(csv_path: Option<&Path>) -> Result<Vec<NewPluCommodity>, EtlError> {
    let path = csv_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_COMMODITIES_CSV));
    if !path.exists() {
        return Err(EtlError::SourceNotFound(path));
    }

    let mut reader = csv::Reader::from_path(&path)?;
    let headers = reader.headers()?.clone();
    for &column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(EtlError::MissingColumn { column });
        }
    }

    let mut commodities = Vec::new();
    for (i, result) in reader.deserialize::<RawPluRow>().enumerate() {
        let raw = result?;
        commodities.push(convert_row(i + 1, raw)?);
    }
    Ok(commodities)
}

/// Upsert a batch of commodities keyed by PLU code. On conflict every field
/// except the row id is overwritten (last write wins, including updated_by
/// and language). One commit for the whole batch.
pub async fn save_plu_commodities(
    pool: &SqlitePool,
    commodities: &[NewPluCommodity],
) -> Result<Vec<PluCommodity>, EtlError> {
    if commodities.is_empty() {
        return Ok(Vec::new());
    }

    let mut tx = pool.begin().await?;
    let mut saved = Vec::with_capacity(commodities.len());
    for c in commodities {
        let row = sqlx::query_as::<_, PluCommodity>(UPSERT_PLU)
            .bind(&c.plu)
            .bind(&c.plu_type)
            .bind(&c.category)
            .bind(&c.commodity)
            .bind(&c.variety)
            .bind(&c.size)
            .bind(&c.measures_na)
            .bind(&c.measures_row)
            .bind(&c.restrictions)
            .bind(&c.botanical)
            .bind(&c.aka)
            .bind(&c.status)
            .bind(&c.link)
            .bind(&c.notes)
            .bind(&c.updated_by)
            .bind(c.updated_at)
            .bind(c.created_at)
            .bind(c.deleted_at)
            .bind(&c.language)
            .fetch_one(&mut *tx)
            .await?;
        saved.push(row);
    }
    tx.commit().await?;

    Ok(saved)
}

/// Full pipeline: load the catalog, upsert the batch. Safe to run repeatedly;
/// a re-import with the same PLU codes updates rows in place.
#[instrument(skip(pool))]
pub async fn import_plu_commodities(
    pool: &SqlitePool,
    csv_path: Option<&Path>,
) -> Result<Vec<PluCommodity>, EtlError> {
    let commodities = load_plu_commodities(csv_path)?;
    let saved = save_plu_commodities(pool, &commodities).await?;
    info!("Imported {} PLU commodities", saved.len());
    Ok(saved)
}
