pub mod health;
pub mod model;
pub mod prediction;

use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the complete route tree.
///
/// Route hierarchy:
///
/// ```text
/// /                      service index (GET)
/// /health                liveness and model status (GET)
/// /version               API and model versions (GET)
///
/// /predict               batch price prediction (POST)
///
/// /model-info            model name, metrics, feature schema (GET)
/// /features              ordered feature list (GET)
/// ```
///
/// Any other path falls through to a JSON 404.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(prediction::router())
        .merge(model::router())
        .fallback(handlers::meta::not_found)
}
