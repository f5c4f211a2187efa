//! Router assembly shared by `main` and the integration tests.

use axum::http::Method;
use axum::Router;
use getaround_server::middleware::apply_middleware;

use crate::routes;
use crate::state::AppState;

/// Build the full application with its middleware stack.
///
/// CORS admits GET and POST: the dashboard only reads and posts JSON.
pub fn build_app(state: AppState) -> Router {
    let http = state.config.http.clone();
    apply_middleware(routes::api_routes(), &http, [Method::GET, Method::POST]).with_state(state)
}
