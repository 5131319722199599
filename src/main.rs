// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Ajito Tracker API Server
//!
//! Records mahjong games and golf rounds and serves dashboard statistics
//! to the mobile client.

use ajito_tracker::{config::Config, db::Database, services::UploadStore, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting Ajito Tracker API");

    // Connect to Postgres (retries, then gives up)
    let db = Database::connect(&config).await?;
    db.run_migrations().await?;

    // Make sure uploaded images have somewhere to go
    let uploads = UploadStore::new(&config.upload_dir);
    uploads.ensure_dir().await?;
    tracing::info!(dir = %config.upload_dir.display(), "Upload directory ready");

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        uploads,
    });

    // Build router
    let app = ajito_tracker::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("ajito_tracker=debug,info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(format)
        .init();
}
