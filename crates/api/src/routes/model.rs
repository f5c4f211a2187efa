use axum::routing::get;
use axum::Router;

use crate::handlers::model;
use crate::state::AppState;

/// Model metadata routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/model-info", get(model::model_info))
        .route("/features", get(model::features))
}
