// src/etl/demo_prices.rs
//
// Demo price generator: fabricates plausible price observations for a random
// slice of the catalog so the UI has data to show. Sampling is split from
// persistence so tests can drive it with a seeded RNG.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use sqlx::{FromRow, SqlitePool};
use tracing::{info, instrument};

use crate::etl::EtlError;
use crate::models::product::{NewProductPrice, Product, ProductPrice};
use crate::models::store::Store;

/// PLU category reserved for retailer-internal codes; never priced.
pub const RETAILER_ASSIGNED_CATEGORY: &str = "Retailer Assigned";

/// Share of categories that receive prices in a generation run.
const CATEGORY_SHARE: f64 = 0.9;
/// Share of products priced within each selected category.
const PRODUCT_SHARE: f64 = 0.5;

const SELECT_STORES: &str = "\
    SELECT id, name, address, city, state, zip_code, is_active, created_at, updated_at
    FROM stores ORDER BY id";

const SELECT_PRICED_CANDIDATES: &str = "\
    SELECT p.id, p.name, p.brand, p.upc, p.unit, p.created_at, p.updated_at, p.is_active,
           c.category
    FROM products p
    JOIN plu_commodities c ON p.upc = c.plu
    WHERE c.category != ?";

const INSERT_PRICE: &str = "\
    INSERT INTO product_prices (product_id, store_id, price, observed_at)
    VALUES (?, ?, ?, ?)
    RETURNING id, product_id, store_id, price, observed_at";

#[derive(Debug, FromRow)]
struct CategorizedProduct {
    #[sqlx(flatten)]
    product: Product,
    category: String,
}

/// Draw price facts for a random ⌊90%⌋ of categories and ⌊50%⌋ of products
/// within each, one price per product × store. Truncating shares mean small
/// inputs can select nothing at all.
pub fn sample_demo_prices<R: Rng + ?Sized>(
    rng: &mut R,
    stores: &[Store],
    products_by_category: &BTreeMap<String, Vec<Product>>,
    now: DateTime<Utc>,
) -> Vec<NewProductPrice> {
    let categories: Vec<&String> = products_by_category
        .keys()
        .filter(|c| c.as_str() != RETAILER_ASSIGNED_CATEGORY)
        .collect();
    let category_count = (categories.len() as f64 * CATEGORY_SHARE) as usize;

    let mut prices = Vec::new();
    for &category in categories.choose_multiple(rng, category_count) {
        let products = &products_by_category[category];
        let product_count = (products.len() as f64 * PRODUCT_SHARE) as usize;

        for product in products.choose_multiple(rng, product_count) {
            for store in stores {
                let cents: i64 = rng.gen_range(79..=500);
                prices.push(NewProductPrice {
                    product_id: product.id,
                    store_id: store.id,
                    price: snap_to_retail_ending(cents),
                    observed_at: now,
                });
            }
        }
    }
    prices
}

/// Generate and persist demo prices for the current catalog. Products whose
/// commodity is retailer-assigned are excluded. One commit for the batch.
#[instrument(skip(pool))]
pub async fn generate_demo_prices(pool: &SqlitePool) -> Result<Vec<ProductPrice>, EtlError> {
    let stores = sqlx::query_as::<_, Store>(SELECT_STORES)
        .fetch_all(pool)
        .await?;

    let candidates = sqlx::query_as::<_, CategorizedProduct>(SELECT_PRICED_CANDIDATES)
        .bind(RETAILER_ASSIGNED_CATEGORY)
        .fetch_all(pool)
        .await?;

    let mut by_category: BTreeMap<String, Vec<Product>> = BTreeMap::new();
    for row in candidates {
        by_category.entry(row.category).or_default().push(row.product);
    }

    let now = Utc::now();
    let sampled = sample_demo_prices(&mut rand::thread_rng(), &stores, &by_category, now);

    let mut tx = pool.begin().await?;
    let mut saved = Vec::with_capacity(sampled.len());
    for price in &sampled {
        let row = sqlx::query_as::<_, ProductPrice>(INSERT_PRICE)
            .bind(price.product_id)
            .bind(price.store_id)
            .bind(price.price)
            .bind(price.observed_at)
            .fetch_one(&mut *tx)
            .await?;
        saved.push(row);
    }
    tx.commit().await?;

    info!(
        "Generated {} demo prices across {} stores",
        saved.len(),
        stores.len()
    );
    Ok(saved)
}

/// Snap a cent amount in [79, 500] to the nearest common retail ending.
/// Threshold bands on the fractional part map to {.00 .25 .33 .50 .75 .99}.
fn snap_to_retail_ending(cents: i64) -> f64 {
    let dollars = (cents / 100) as f64;
    let fraction = (cents % 100) as f64 / 100.0;

    let ending = if fraction < 0.125 {
        0.0
    } else if fraction < 0.29 {
        0.25
    } else if fraction < 0.415 {
        0.33
    } else if fraction < 0.625 {
        0.50
    } else if fraction < 0.875 {
        0.75
    } else {
        0.99
    };

    dollars + ending
}

#[cfg(test)]
mod tests {
    use super::snap_to_retail_ending;

    fn assert_snaps(cents: i64, expected: f64) {
        let got = snap_to_retail_ending(cents);
        assert!(
            (got - expected).abs() < 1e-9,
            "{} cents snapped to {}, expected {}",
            cents,
            got,
            expected
        );
    }

    #[test]
    fn snaps_each_threshold_band() {
        assert_snaps(112, 1.00);
        assert_snaps(113, 1.25);
        assert_snaps(128, 1.25);
        assert_snaps(129, 1.33);
        assert_snaps(141, 1.33);
        assert_snaps(142, 1.50);
        assert_snaps(162, 1.50);
        assert_snaps(163, 1.75);
        assert_snaps(187, 1.75);
        assert_snaps(188, 1.99);
        assert_snaps(199, 1.99);
    }

    #[test]
    fn snaps_range_endpoints() {
        assert_snaps(79, 0.75);
        assert_snaps(500, 5.00);
    }
}
