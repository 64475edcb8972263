// ==========================================
// Billing Hub - HTTP server entry point
// ==========================================

use billing_hub::app::{router, AppState};
use billing_hub::settings::Settings;
use billing_hub::{logging, APP_NAME, VERSION};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} v{}", APP_NAME, VERSION);
    tracing::info!("==================================================");

    let settings = Settings::from_env();
    tracing::info!(db_path = %settings.db_path, "using database");
    tracing::info!(upload_dir = %settings.upload_dir.display(), "using upload directory");

    let bind_addr = settings.bind_addr.clone();
    let state = Arc::new(AppState::new(settings)?);
    let store = state.store.clone();

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "server listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // release the store before the process goes away
    store.close()?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
    }
    tracing::info!("shutdown signal received");
}
