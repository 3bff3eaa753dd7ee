/*****************************************************************************************
 *
 *  timestore – single-timestamp store over HTTP
 *  --------------------------------------------
 *
 *  POST /setTime   store a timestamp
 *  GET  /getTime   read it back
 *
 *****************************************************************************************/

use std::net::SocketAddr;

use anyhow::Context;
use axum::serve;
use tokio::net::TcpListener;
use tracing_subscriber::FmtSubscriber;

use timestore::app;
use timestore::config::AppConfig;
use timestore::state::{AppState, TimestampStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    //
    // ────────────────────────────────────────────────────────
    //  Load configuration
    // ────────────────────────────────────────────────────────
    //
    let config_path = AppConfig::locate()?;
    let cfg = AppConfig::load_from_file(&config_path)?;

    //
    // ────────────────────────────────────────────────────────
    //  Configure logging
    // ────────────────────────────────────────────────────────
    //
    let subscriber = FmtSubscriber::builder()
        .with_max_level(cfg.level_filter())
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    tracing::info!("Loaded config.json from {}", config_path.display());
    tracing::info!("Loaded configuration: {:?}", cfg);

    //
    // ────────────────────────────────────────────────────────
    //  Start the store before anything can reach it
    // ────────────────────────────────────────────────────────
    //
    let store = TimestampStore::spawn(cfg.mailbox_capacity).await?;

    //
    // ────────────────────────────────────────────────────────
    //  Build Axum app (time + system routes)
    // ────────────────────────────────────────────────────────
    //
    let state = AppState::new(store, cfg.wire_format);
    let app = app::build_app(state, cfg.clone());

    //
    // ────────────────────────────────────────────────────────
    //  Bind server and start listening
    // ────────────────────────────────────────────────────────
    //
    let addr = SocketAddr::new(cfg.host, cfg.port);
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!("Listening on http://{} ({} format)", addr, cfg.wire_format);

    serve(listener, app)
        .with_graceful_shutdown(shutdown())
        .await
        .context("server error")?;

    tracing::info!("Server stopped. Goodbye.");
    Ok(())
}

//
// ─────────────────────────────────────────────────────────────
//  Graceful shutdown handler
// ─────────────────────────────────────────────────────────────
//
async fn shutdown() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::warn!("CTRL+C received, shutting down"),
        Err(e) => tracing::error!("failed to listen for shutdown signal: {e}"),
    }
}
