mod config;
mod corpus;
mod errors;
mod interview;
mod matching;
mod resume;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::corpus::RoleCorpus;
use crate::interview::question_bank::QuestionBank;
use crate::interview::store::SessionStore;
use crate::resume::decode::ContainerDecoder;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first; malformed values abort startup
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting interview prep API v{}", env!("CARGO_PKG_VERSION"));

    // Role corpus: an absent or malformed dataset degrades to an empty corpus
    let load = RoleCorpus::load(&config.corpus_path);
    if let Some(diagnostic) = &load.diagnostic {
        warn!("Role matching disabled: {diagnostic}");
    }
    info!("Role corpus ready ({} postings)", load.corpus.len());

    // Optional level-based question bank; a configured but invalid bank is fatal
    let question_bank = match &config.question_bank_path {
        Some(path) => {
            let bank = QuestionBank::load(path)
                .with_context(|| format!("Failed to load question bank from {path}"))?;
            info!("Question bank loaded from {path}");
            Some(Arc::new(bank))
        }
        None => None,
    };

    let state = AppState {
        config: config.clone(),
        corpus: Arc::new(load.corpus),
        corpus_diagnostic: load.diagnostic,
        question_bank,
        sessions: SessionStore::new(),
        decoder: Arc::new(ContainerDecoder),
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
