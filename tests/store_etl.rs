mod common;

use std::path::{Path, PathBuf};

use grocery_tracker::etl::stores::{
    convert_gmaps_store, import_gmaps_stores, load_gmaps_stores, save_stores, GmapsStoreRecord,
};
use grocery_tracker::etl::EtlError;
use grocery_tracker::models::store::{NewStore, Store};

fn test_csv_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data/grocery_stores_chattanooga.test.csv")
}

fn record(name: &str, address: &str) -> GmapsStoreRecord {
    GmapsStoreRecord {
        name: name.to_string(),
        address: address.to_string(),
    }
}

#[test]
fn loads_gmaps_export_rows_in_order() {
    let stores = load_gmaps_stores(&test_csv_path()).unwrap();
    assert!(!stores.is_empty(), "should load at least one store");

    let first = &stores[0];
    assert_eq!(first.name, "Publix Super Market on North Market Street");
    assert!(first.address.contains("400 N Market St"));
}

#[test]
fn missing_export_file_is_reported() {
    let err = load_gmaps_stores(Path::new("data/no_such_export.csv")).unwrap_err();
    assert!(matches!(err, EtlError::SourceNotFound(_)));
}

#[test]
fn converts_combined_address_into_fields() {
    let store = convert_gmaps_store(&record(
        "Test Store",
        "123 Main St, Springfield, MA 01234, USA",
    ))
    .unwrap();

    assert_eq!(store.name, "Test Store");
    assert_eq!(store.address, "123 Main St");
    assert_eq!(store.city, "Springfield");
    assert_eq!(store.state, "MA");
    assert_eq!(store.zip_code, "01234");
}

#[test]
fn truncates_zip_to_five_digits() {
    let store = convert_gmaps_store(&record(
        "Test Store",
        "123 Main St, Springfield, MA 01234-6789, USA",
    ))
    .unwrap();
    assert_eq!(store.zip_code, "01234");
}

#[test]
fn rejects_addresses_that_do_not_fit_the_export_shape() {
    // Too few comma segments to hold street, city and state/zip.
    let err = convert_gmaps_store(&record("Test Store", "123 Main St")).unwrap_err();
    assert!(matches!(err, EtlError::MalformedAddress(_)));

    let err = convert_gmaps_store(&record("Test Store", "123 Main St, MA 01234")).unwrap_err();
    assert!(matches!(err, EtlError::MalformedAddress(_)));

    // State/zip segment with a single token.
    let err =
        convert_gmaps_store(&record("Test Store", "123 Main St, Springfield, MA, USA")).unwrap_err();
    assert!(matches!(err, EtlError::MalformedAddress(_)));
}

#[tokio::test]
async fn upsert_inserts_then_updates_in_place() {
    let pool = common::memory_pool().await;

    let first = NewStore {
        name: "Test Store".to_string(),
        address: "123 Main St".to_string(),
        city: "Old City".to_string(),
        state: "MA".to_string(),
        zip_code: "01234".to_string(),
    };
    let saved = save_stores(&pool, &[first]).await.unwrap();
    assert_eq!(saved.len(), 1);
    let original = &saved[0];
    assert_eq!(original.city, "Old City");
    assert!(original.is_active);

    let second = NewStore {
        name: "Test Store".to_string(),
        address: "123 Main St".to_string(),
        city: "New City".to_string(),
        state: "MA".to_string(),
        zip_code: "01234".to_string(),
    };
    let saved = save_stores(&pool, &[second]).await.unwrap();
    assert_eq!(saved.len(), 1);
    let updated = &saved[0];

    assert_eq!(updated.id, original.id, "same natural key keeps the row");
    assert_eq!(updated.city, "New City");
    assert_eq!(updated.name, "Test Store");
    assert_eq!(updated.address, "123 Main St");
    assert_eq!(updated.created_at, original.created_at);
    assert!(updated.updated_at >= original.updated_at);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM stores")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1, "re-import must not duplicate the store");
}

#[tokio::test]
async fn import_is_idempotent_over_the_same_file() {
    let pool = common::memory_pool().await;
    let path = test_csv_path();

    let first = import_gmaps_stores(&pool, &path).await.unwrap();
    let second = import_gmaps_stores(&pool, &path).await.unwrap();
    assert_eq!(first.len(), second.len());

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM stores")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count as usize, first.len());

    let chattanooga: Vec<Store> =
        sqlx::query_as("SELECT id, name, address, city, state, zip_code, is_active, created_at, updated_at FROM stores WHERE city = ?")
            .bind("Chattanooga")
            .fetch_all(&pool)
            .await
            .unwrap();
    assert_eq!(chattanooga.len(), first.len());
}

#[tokio::test]
async fn malformed_row_aborts_the_whole_import() {
    let pool = common::memory_pool().await;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stores.csv");
    std::fs::write(
        &path,
        "name,address\n\
         Good Store,\"1 Good St, Goodville, TN 37000, United States\"\n\
         Bad Store,no commas here\n",
    )
    .unwrap();

    let err = import_gmaps_stores(&pool, &path).await.unwrap_err();
    assert!(matches!(err, EtlError::MalformedAddress(_)));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM stores")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0, "nothing may persist when the batch fails");
}
