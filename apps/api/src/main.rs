mod analysis;
mod config;
mod db;
mod errors;
mod models;
mod routes;
mod state;
mod store;
mod upload;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::extractor::PdfTextExtractor;
use crate::analysis::sections::AnalysisConfig;
use crate::config::Config;
use crate::db::create_pool;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::postgres::PgRecordStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Analyzer v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL (migrations included)
    let db = create_pool(&config.database_url, config.database_max_connections).await?;

    let analysis = AnalysisConfig::standard().context("compile section patterns")?;
    info!("Analysis config loaded ({} sections)", analysis.sections.len());

    std::fs::create_dir_all(&config.upload_dir)
        .with_context(|| format!("create upload dir {}", config.upload_dir.display()))?;
    info!("Upload scratch space: {}", config.upload_dir.display());

    // Build app state
    let state = AppState {
        store: Arc::new(PgRecordStore::new(db)),
        extractor: Arc::new(PdfTextExtractor),
        analysis: Arc::new(analysis),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
