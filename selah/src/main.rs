use anyhow::Context;
use selah::{AppConfig, build_state, server};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::load().context("loading configuration")?;
    for warning in config.validate().context("validating configuration")? {
        tracing::warn!(phase = "startup", "{warning}");
    }

    let state = build_state(&config).context("building service state")?;
    let providers: Vec<_> = state
        .chat
        .registry()
        .ids()
        .map(|id| id.to_string())
        .collect();
    let app = server::router(state, &config.cors_origins);

    let listener = tokio::net::TcpListener::bind(config.bind_address())
        .await
        .with_context(|| format!("binding {}", config.bind_address()))?;
    let address = listener.local_addr()?;
    tracing::info!(
        phase = "startup",
        address = %address,
        providers = ?providers,
        "selah listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!(phase = "shutdown", "selah stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(phase = "shutdown", error = %err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
