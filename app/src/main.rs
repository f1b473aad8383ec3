//! Tokengate application entry point
//!
//! Serves the claim/mint client's HTTP API for the single-page frontend.

use tokengate_api::{start_server, AppState};
use tokengate_core::AppConfig;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tokengate=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .init();

    tracing::info!("Starting Tokengate application");

    let config = AppConfig::from_env();
    let port = config.api_port;
    tracing::info!(
        network = %config.network,
        rpc_url = %config.rpc.url,
        port,
        "configuration loaded"
    );

    let state = AppState::with_config(config);

    if let Err(e) = start_server(state, port).await {
        tracing::error!("API server failed: {}", e);
        std::process::exit(1);
    }
}
