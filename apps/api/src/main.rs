mod config;
mod errors;
mod generation;
mod llm_client;
mod models;
mod resumes;
mod routes;
mod state;
mod templates;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::generation::gateway::ContentGateway;
use crate::llm_client::LlmClient;
use crate::resumes::store::InMemoryResumeStore;
use crate::routes::build_router;
use crate::state::AppState;
use crate::templates::catalog::TemplateCatalog;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume API v{}", env!("CARGO_PKG_VERSION"));

    // Records live for the process lifetime only
    let resumes = Arc::new(InMemoryResumeStore::new());

    let templates = Arc::new(TemplateCatalog::builtin());
    info!("Template catalog loaded ({} templates)", templates.list().len());

    // A missing key is reported per request, not here
    let llm = LlmClient::new(config.anthropic_api_key.clone(), config.llm_timeout_secs)?;
    if llm.has_api_key() {
        info!("LLM client initialized (model: {})", llm_client::MODEL);
    } else {
        warn!("ANTHROPIC_API_KEY is not set; AI content endpoints will fail until it is provided");
    }
    let gateway = ContentGateway::new(Arc::new(llm));

    let state = AppState {
        resumes,
        templates,
        gateway,
        config: config.clone(),
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
