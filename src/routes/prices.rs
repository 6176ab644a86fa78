use axum::{
    routing::{get, post},
    Router,
};
use crate::handlers::price::{generate_prices, get_prices};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/prices", get(get_prices))
        .route("/prices/generate", post(generate_prices))
}
