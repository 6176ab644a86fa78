// src/database.rs
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

/// Open the SQLite pool and enable foreign key enforcement.
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&pool)
        .await?;

    Ok(pool)
}

/// Create all tables if they do not exist yet (idempotent, safe to call on
/// every startup).
///
/// Natural keys carry UNIQUE constraints so the importers can upsert with a
/// single `INSERT .. ON CONFLICT` statement per row.
pub async fn create_tables(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS stores (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            address TEXT NOT NULL,
            city TEXT NOT NULL,
            state TEXT NOT NULL,
            zip_code TEXT NOT NULL,
            is_active BOOLEAN NOT NULL DEFAULT TRUE,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            UNIQUE (name, address)
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_stores_city ON stores (city)")
        .execute(pool)
        .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS plu_commodities (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            plu TEXT NOT NULL UNIQUE,
            type TEXT NOT NULL,
            category TEXT NOT NULL,
            commodity TEXT NOT NULL,
            variety TEXT NOT NULL,
            size TEXT NOT NULL,
            measures_na TEXT,
            measures_row TEXT,
            restrictions TEXT,
            botanical TEXT,
            aka TEXT,
            status TEXT NOT NULL,
            link TEXT,
            notes TEXT,
            updated_by TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            created_at TEXT NOT NULL,
            deleted_at TEXT,
            language TEXT NOT NULL DEFAULT 'EN'
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_plu_commodities_category ON plu_commodities (category)")
        .execute(pool)
        .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS products (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            brand TEXT,
            upc TEXT UNIQUE,
            unit TEXT NOT NULL DEFAULT 'each',
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            is_active BOOLEAN NOT NULL DEFAULT TRUE
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS product_prices (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            product_id INTEGER NOT NULL REFERENCES products (id),
            store_id INTEGER NOT NULL REFERENCES stores (id),
            price REAL NOT NULL,
            observed_at TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_product_prices_product ON product_prices (product_id)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_product_prices_store ON product_prices (store_id)")
        .execute(pool)
        .await?;

    Ok(())
}
