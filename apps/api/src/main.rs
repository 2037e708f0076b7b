mod config;
mod db;
mod errors;
mod generation;
mod jobs;
mod llm_client;
mod models;
mod profile;
mod render;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::{create_pool, PgStore};
use crate::jobs::orchestrator::{Orchestrator, StagePacing};
use crate::llm_client::backend::GeminiBackend;
use crate::llm_client::rate_limit::TokenBucket;
use crate::llm_client::{RetryPolicy, StructuredClient};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Tailor API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;
    let store = Arc::new(PgStore::new(db));

    // Initialize generation client
    let llm = StructuredClient::new(
        Arc::new(GeminiBackend::new(config.gemini_api_key.clone())),
        Arc::new(TokenBucket::per_minute(
            config.llm_requests_per_minute,
            config.llm_burst,
        )),
        RetryPolicy::default(),
    );
    info!(
        "Generation client initialized (model: {}, fallback: {}, {} req/min)",
        llm_client::PRIMARY_MODEL,
        llm_client::FALLBACK_MODEL,
        config.llm_requests_per_minute
    );

    let orchestrator = Orchestrator::new(
        store.clone(),
        store.clone(),
        llm,
        StagePacing::new(Duration::from_millis(config.stage_delay_ms)),
    );

    // Build app state
    let state = AppState {
        orchestrator: Arc::new(orchestrator),
        profiles: store,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict CORS to the web client's origin once it is deployed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
