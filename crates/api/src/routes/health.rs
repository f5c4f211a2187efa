use axum::routing::get;
use axum::Router;

use crate::handlers::meta;
use crate::state::AppState;

/// Index, health and version endpoints.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(meta::index))
        .route("/health", get(meta::health))
        .route("/version", get(meta::version))
}
