mod api;
mod config;
mod middleware;

use anyhow::Context;
use config::ServerConfig;
use shoplist_core::AppCore;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,shoplist_server=debug".into()),
        )
        .with_target(false)
        .with_thread_ids(true)
        .with_line_number(true)
        .init();

    info!("Starting shopping list server");

    let config = ServerConfig::load()?;
    let db_path = config
        .resolve_database_path()
        .context("Failed to determine database path")?;
    let core = Arc::new(
        AppCore::new(&db_path)
            .await
            .context("Failed to initialize app core")?,
    );

    let app = api::build_router(core, &config.cors_origins);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("Shopping list server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
