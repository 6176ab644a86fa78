pub mod prices;
pub mod products;
pub mod stores;

use axum::Router;
use crate::state::AppState;

pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(products::routes())
        .merge(stores::routes())
        .merge(prices::routes())
}
