// src/etl/products.rs
//
// Product derivation: every PLU commodity becomes a sellable product.
// Unlike the store and PLU importers this is insert-if-absent, not an
// upsert; a commodity that already has a product leaves it untouched.

use chrono::Utc;
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::{info, instrument};

use crate::etl::EtlError;
use crate::models::plu::PluCommodity;
use crate::models::product::Product;

const SELECT_PLU_COLUMNS: &str = "\
    SELECT id, plu, type, category, commodity, variety, size, measures_na,
        measures_row, restrictions, botanical, aka, status, link, notes,
        updated_by, updated_at, created_at, deleted_at, language
    FROM plu_commodities";

const SELECT_PRODUCT_BY_UPC: &str = "\
    SELECT id, name, brand, upc, unit, created_at, updated_at, is_active
    FROM products WHERE upc = ?";

const INSERT_PRODUCT: &str = "\
    INSERT INTO products (name, brand, upc, unit, created_at, updated_at, is_active)
    VALUES (?, NULL, ?, ?, ?, ?, ?)
    RETURNING id, name, brand, upc, unit, created_at, updated_at, is_active";

/// Derive products for every commodity in the catalog. Commodities that
/// already have a product contribute the existing row unchanged. One commit
/// for the whole batch.
#[instrument(skip(pool))]
pub async fn import_all_plu_to_products(pool: &SqlitePool) -> Result<Vec<Product>, EtlError> {
    let mut tx = pool.begin().await?;

    let plus = sqlx::query_as::<_, PluCommodity>(&format!("{SELECT_PLU_COLUMNS} ORDER BY id"))
        .fetch_all(&mut *tx)
        .await?;

    let mut products = Vec::with_capacity(plus.len());
    for plu in &plus {
        products.push(derive_product(&mut tx, plu).await?);
    }
    tx.commit().await?;

    info!("Derived {} products from PLU commodities", products.len());
    Ok(products)
}

/// Derive a product for a single commodity, looked up by row id. Returns
/// None when no such commodity exists.
#[instrument(skip(pool))]
pub async fn import_plu_to_product(
    pool: &SqlitePool,
    plu_id: i64,
) -> Result<Option<Product>, EtlError> {
    let mut tx = pool.begin().await?;

    let plu = sqlx::query_as::<_, PluCommodity>(&format!("{SELECT_PLU_COLUMNS} WHERE id = ?"))
        .bind(plu_id)
        .fetch_optional(&mut *tx)
        .await?;
    let Some(plu) = plu else {
        return Ok(None);
    };

    let product = derive_product(&mut tx, &plu).await?;
    tx.commit().await?;

    Ok(Some(product))
}

/// Insert-if-absent keyed by upc = PLU code.
async fn derive_product(
    tx: &mut Transaction<'_, Sqlite>,
    plu: &PluCommodity,
) -> Result<Product, EtlError> {
    if let Some(existing) = sqlx::query_as::<_, Product>(SELECT_PRODUCT_BY_UPC)
        .bind(&plu.plu)
        .fetch_optional(&mut **tx)
        .await?
    {
        return Ok(existing);
    }

    let now = Utc::now();
    let product = sqlx::query_as::<_, Product>(INSERT_PRODUCT)
        .bind(product_name(plu))
        .bind(&plu.plu)
        .bind(product_unit(plu))
        .bind(now)
        .bind(now)
        .bind(plu.deleted_at.is_none())
        .fetch_one(&mut **tx)
        .await?;
    Ok(product)
}

fn product_name(plu: &PluCommodity) -> String {
    title_case(&format!("{} - {}", plu.commodity, plu.variety))
}

/// NA-region size measures mark produce sold by weight.
fn product_unit(plu: &PluCommodity) -> &'static str {
    if plu.measures_na.as_deref().map_or(false, |m| !m.is_empty()) {
        "lb"
    } else {
        "each"
    }
}

/// Uppercase the first letter of every alphabetic run, lowercase the rest.
/// Catalog names arrive as "APPLES"; products display as "Apples".
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for ch in s.chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(ch);
            at_word_start = true;
        }
    }
    out
}
