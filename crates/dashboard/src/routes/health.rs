use axum::routing::get;
use axum::Router;

use crate::handlers::meta;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(meta::health))
}
