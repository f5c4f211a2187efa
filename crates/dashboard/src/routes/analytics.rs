use axum::routing::get;
use axum::Router;

use crate::handlers::analytics;
use crate::state::AppState;

/// Read-only analytics routes; all accept the shared query parameters.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(analytics::categories))
        .route("/overview", get(analytics::overview))
        .route("/checkin-types", get(analytics::checkin_types))
        .route("/distribution", get(analytics::distribution))
        .route("/summary", get(analytics::summary))
        .route("/records", get(analytics::records))
        .route("/simulation", get(analytics::simulation))
        .route("/sweep", get(analytics::sweep))
        .route("/report", get(analytics::full_report))
}
