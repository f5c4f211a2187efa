pub mod analytics;
pub mod health;

use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the analytics route tree.
///
/// ```text
/// /health                dataset status (GET)
///
/// /categories            checkin types present in the dataset
/// /overview              headline lateness figures
/// /checkin-types         per-type breakdown
/// /distribution          delay histogram
/// /summary               descriptive statistics
/// /records               raw record preview
/// /simulation            one threshold on one scope
/// /sweep                 candidate thresholds and recommendation
/// /report                everything for one parameter set
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(analytics::router())
        .fallback(handlers::meta::not_found)
}
