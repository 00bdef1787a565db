use eyre::Result;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use radulator_server::config::{LogFormat, ServerConfig};
use radulator_server::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let config = ServerConfig::from_env()?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt().with_env_filter(filter).json().init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }

    let registry = radulator_calculators::default_registry();
    tracing::info!(
        calculators = registry.len(),
        categories = registry.sorted_categories().len(),
        "registry loaded"
    );

    let app = radulator_server::router(AppState::new(registry), config.cors_layer());

    let listener = TcpListener::bind(config.bind).await?;
    tracing::info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
    tracing::info!("shutting down");
}
