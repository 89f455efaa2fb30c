mod catalog;
mod config;
mod db;
mod errors;
mod ingest;
mod matching;
mod models;
mod repository;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use resumatch_core::ResourceConfig;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::{create_pool, ensure_schema};
use crate::ingest::text::DocumentTextExtractor;
use crate::repository::PgStore;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={},resumatch_core={}",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log,
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resumatch API v{}", env!("CARGO_PKG_VERSION"));

    // Load the skill vocabulary and language pipeline up front; a bad resource aborts startup.
    let resources = ResourceConfig {
        skills_path: config.skills_path.clone(),
    };
    tokio::task::spawn_blocking(move || resumatch_core::init(&resources))
        .await
        .context("resource loading task failed")?
        .context("failed to load matching resources")?;
    info!("Matching resources loaded");

    let extractor = Arc::new(DocumentTextExtractor);
    let state = match &config.database_url {
        Some(url) => {
            let pool = create_pool(url).await?;
            ensure_schema(&pool).await?;
            let store = Arc::new(PgStore::new(pool));
            AppState {
                config: config.clone(),
                candidates: store.clone(),
                jobs: store,
                extractor,
            }
        }
        None => {
            info!("DATABASE_URL not set, using in-memory storage");
            AppState::in_memory(config.clone(), extractor)
        }
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
