use axum::{
    routing::{get, post},
    Router,
};
use crate::handlers::product::{get_products, import_plu, import_plu_products};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(get_products))
        .route("/products/import-plu", post(import_plu))
        .route("/products/import-plu-products", post(import_plu_products))
}
