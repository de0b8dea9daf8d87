//! Tradedesk - in-memory trade submission service
//!
//! Clients post batches of trades; the service validates them, assigns
//! content-derived ids and serves lookup, update and deletion by id.
//! State lives in memory only and is cleared on restart.

use anyhow::{Context, Result};
use axum::middleware;
use clap::Parser;
use dotenv::dotenv;
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tradedesk_backend::{
    api::create_router, config::Config, middleware::request_logging, trades::TradeStore,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize environment and logging
    load_env();
    init_tracing();

    let config = Config::parse();
    info!(host = %config.host, port = config.port, "Tradedesk starting");

    let store = Arc::new(TradeStore::new());

    let app = create_router(store)
        .layer(middleware::from_fn(request_logging))
        .layer(CorsLayer::permissive());

    // Start server
    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

fn load_env() {
    // 1) Standard dotenv search (cwd + parents)
    let _ = dotenv();

    // 2) Also try the crate directory when launched from elsewhere
    let env_file = Path::new(env!("CARGO_MANIFEST_DIR")).join(".env");
    if env_file.exists() {
        let _ = dotenv::from_path(&env_file);
    }
}

/// Initialize tracing; RUST_LOG overrides the default filter
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tradedesk_backend=debug,tradedesk=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
