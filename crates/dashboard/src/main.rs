use anyhow::Context;

use getaround_dashboard::app::build_app;
use getaround_dashboard::config::ServerConfig;
use getaround_dashboard::dataset;
use getaround_dashboard::state::AppState;
use getaround_server::serve::serve;
use getaround_server::telemetry::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = ServerConfig::from_env().context("Invalid server configuration")?;

    init_tracing(
        config.http.log_format,
        "getaround_dashboard=debug,getaround_core=debug,getaround_server=debug,tower_http=debug",
    );
    tracing::info!(host = %config.http.host, port = %config.http.port, "Loaded analytics configuration");

    // --- Dataset ---
    let path = config.dataset_path.clone();
    let loaded = tokio::task::spawn_blocking(move || dataset::load(&path))
        .await
        .context("Dataset loader task panicked")?;

    let http = config.http.clone();
    serve(build_app(AppState::from_load(loaded, config)), &http).await
}
