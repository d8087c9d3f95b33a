mod auth;
mod config;
mod db;
mod errors;
mod extract;
mod format;
mod generation;
mod llm_client;
mod market;
mod models;
mod packs;
mod roleplay;
mod routes;
mod state;
mod store;

#[cfg(test)]
mod testing;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::auth::HostedIdentity;
use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::LlmClient;
use crate::market::TableEstimator;
use crate::roleplay::{DialogueEngine, FallbackResponder};
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{MemoryStore, PgStore};

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

    info!("Starting Negotiator API v{}", env!("CARGO_PKG_VERSION"));

    // Persistence: Postgres when configured, process memory otherwise
    let (packs, sessions) = match &config.database_url {
        Some(url) => store::shared(PgStore::new(create_pool(url).await?)),
        None => {
            warn!("DATABASE_URL not set; packs and sessions are kept in memory only");
            store::shared(MemoryStore::new())
        }
    };

    // Initialize LLM client
    let llm = Arc::new(LlmClient::new(
        config.anthropic_api_key.clone(),
        config.llm_model.clone(),
        Duration::from_secs(config.llm_timeout_secs),
    )?);
    info!(
        "LLM client initialized (model: {}, timeout: {}s)",
        llm.model(),
        config.llm_timeout_secs
    );

    let identity = Arc::new(HostedIdentity::new(
        &config.auth_url,
        config.auth_service_key.clone(),
    ));

    let engine = DialogueEngine::new(
        packs.clone(),
        sessions.clone(),
        llm.clone(),
        Arc::new(FallbackResponder::from_entropy()),
    );

    // Build app state
    let state = AppState {
        packs,
        sessions,
        llm,
        market: Arc::new(TableEstimator),
        identity,
        engine,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web client's domain is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
