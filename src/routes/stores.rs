use axum::{
    routing::{get, post},
    Router,
};
use crate::handlers::store::{get_stores, import_stores};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/stores", get(get_stores))
        .route("/stores/import", post(import_stores))
}
