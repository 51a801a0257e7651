mod config;
mod dataset;
mod errors;
mod models;
mod routes;
mod skills;
mod state;

use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::dataset::load_dataset;
use crate::routes::build_router;
use crate::skills::catalog::SkillCatalog;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting skill gap API v{}", env!("CARGO_PKG_VERSION"));

    // Dataset is read once; a missing or unparseable file is fatal
    let dataset = load_dataset(&config.data_path)?;
    if dataset.is_empty() {
        warn!("Student dataset has no rows; every lookup will return 404");
    }

    let catalog = SkillCatalog::builtin();
    info!(
        "Skill catalog ready: {} subjects, {} careers, strong threshold {}",
        catalog.subjects().count(),
        catalog.career_count(),
        config.strong_threshold
    );

    let state = AppState {
        catalog: Arc::new(catalog),
        dataset: Arc::new(dataset),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let listener = bind_listener(&config.host, config.port).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Binds `host:port`; `host` may be an IP literal or a resolvable hostname.
async fn bind_listener(host: &str, port: u16) -> Result<TcpListener> {
    TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind {host}:{port}"))
}
