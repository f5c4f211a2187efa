use anyhow::Context;

use getaround_api::app::build_app;
use getaround_api::config::ServerConfig;
use getaround_api::state::AppState;
use getaround_api::API_VERSION;
use getaround_core::model::ModelHost;
use getaround_server::serve::serve;
use getaround_server::telemetry::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Configuration ---
    let config = ServerConfig::from_env().context("Invalid server configuration")?;

    // --- Tracing ---
    init_tracing(
        config.http.log_format,
        "getaround_api=debug,getaround_core=debug,getaround_server=debug,tower_http=debug",
    );
    tracing::info!(host = %config.http.host, port = %config.http.port, "Loaded server configuration");

    // --- Model ---
    let host = ModelHost::load(&config.model_path);
    if host.is_loaded() {
        tracing::info!(version = API_VERSION, "API ready to accept requests");
    } else {
        tracing::warn!(version = API_VERSION, "Model not loaded, prediction endpoints will answer 503");
    }

    // --- Start server ---
    let http = config.http.clone();
    serve(build_app(AppState::new(host, config)), &http).await
}
