use anyhow::Context;
use tracing_subscriber::EnvFilter;

use expolink_api::{app, config, store, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = config::config();
    tracing::info!(
        "Starting Expolink API in {:?} mode ({:?} store)",
        config.environment,
        config.store.backend
    );

    if expolink_api::is_development!() {
        tracing::info!("Development profile: default admin credentials and JWT secret are in use");
    }

    if config.security.jwt_secret.is_empty() {
        tracing::warn!("JWT_SECRET is not set; admin login will be refused");
    }

    let store = store::connect(config)
        .await
        .context("failed to open the configured store")?;
    let state = AppState::from_config(store, config);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Expolink API listening on http://{}", bind_addr);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
