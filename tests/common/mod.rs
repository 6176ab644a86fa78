#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use grocery_tracker::database;
use grocery_tracker::models::plu::NewPluCommodity;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

/// Fresh in-memory database with the full schema. A single connection keeps
/// every query in the test on the same database.
pub async fn memory_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("open in-memory sqlite");
    database::create_tables(&pool).await.expect("create schema");
    pool
}

pub fn fixture_stamp() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 2, 2)
        .unwrap()
        .and_hms_opt(19, 50, 24)
        .unwrap()
}

pub fn plu_fixture(
    plu: &str,
    category: &str,
    commodity: &str,
    variety: &str,
    measures_na: Option<&str>,
) -> NewPluCommodity {
    NewPluCommodity {
        plu: plu.to_string(),
        plu_type: "Global".to_string(),
        category: category.to_string(),
        commodity: commodity.to_string(),
        variety: variety.to_string(),
        size: "All Sizes".to_string(),
        measures_na: measures_na.map(str::to_string),
        measures_row: None,
        restrictions: None,
        botanical: None,
        aka: None,
        status: "Approved".to_string(),
        link: None,
        notes: None,
        updated_by: "Test".to_string(),
        updated_at: fixture_stamp(),
        created_at: fixture_stamp(),
        deleted_at: None,
        language: "EN".to_string(),
    }
}
