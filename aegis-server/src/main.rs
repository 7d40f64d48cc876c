//! Aegis Server - REST API for shallow upload analysis
//!
//! Exposes aegis-core analysis via HTTP endpoints:
//! - POST /analyze-file - Analyze an uploaded file or raw text
//! - POST /api/analyze-file - Keyword insights for text content
//! - GET /health - Health check

use aegis_server::{create_router_with_config, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("aegis_server=debug,aegis_core=info,tower_http=debug"));

    let json = std::env::var("LOG_FORMAT")
        .map(|f| f.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    dotenvy::dotenv().ok();
    init_tracing();

    let config = Config::from_env();
    let addr = config.socket_addr();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        analysis_mode = config.analysis_mode.as_str(),
        inference_configured = config.inference_api_key.is_some(),
        max_file_size_mb = config.max_file_size_mb,
        "Starting Aegis Digital AI Backend"
    );

    let app = create_router_with_config(&config);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{}", addr);
    tracing::info!("API docs at http://{}/docs", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
