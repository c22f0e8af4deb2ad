mod config;
mod db;
mod errors;
mod formatting;
mod generation;
mod library;
mod llm_client;
mod models;
mod resources;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::formatting::{FormatterRules, PlatformFormatter};
use crate::generation::{PromptCatalog, PromptComposer};
use crate::library::{
    seed_default_resources, seed_profile, InMemoryLibraryStore, LibraryStore, PgLibraryStore,
};
use crate::llm_client::LlmClient;
use crate::resources::ResourceFetcher;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting coachposts API v{}", env!("CARGO_PKG_VERSION"));

    // Library: Postgres when configured, otherwise in-process
    let store: Arc<dyn LibraryStore> = match &config.database_url {
        Some(url) => Arc::new(PgLibraryStore::new(create_pool(url).await?)),
        None => {
            warn!("DATABASE_URL not set, library is in memory and will not survive restarts");
            Arc::new(InMemoryLibraryStore::new())
        }
    };
    seed_default_resources(store.as_ref()).await?;
    // COACH_NAME only names a fresh profile; an edited profile wins.
    seed_profile(store.as_ref(), &config.coach_name).await?;

    let timeout = Duration::from_secs(config.http_timeout_secs);

    let llm = LlmClient::new(config.gemini_api_key.clone(), timeout)?;
    if config.gemini_api_key.is_none() {
        warn!("GEMINI_API_KEY not set, requests must send an x-gemini-api-key header");
    }
    info!("LLM client initialized (models: {})", llm_client::MODELS.join(", "));

    let fetcher = ResourceFetcher::new(timeout, config.resource_fetch_max_chars)?;

    let catalog = PromptCatalog::bowling();
    info!("Prompt catalog loaded: {} personas", catalog.personas.all().len());

    let state = AppState {
        store,
        llm: Arc::new(llm),
        fetcher,
        composer: Arc::new(PromptComposer::new(catalog)),
        formatter: Arc::new(PlatformFormatter::new(FormatterRules::default())),
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
