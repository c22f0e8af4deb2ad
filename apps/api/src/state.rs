use std::sync::Arc;

use crate::config::Config;
use crate::formatting::PlatformFormatter;
use crate::generation::PromptComposer;
use crate::library::LibraryStore;
use crate::llm_client::TextGenerator;
use crate::resources::ResourceFetcher;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Posts and resources. Postgres or in-memory depending on `DATABASE_URL`.
    pub store: Arc<dyn LibraryStore>,
    /// `LlmClient` in production.
    pub llm: Arc<dyn TextGenerator>,
    pub fetcher: ResourceFetcher,
    pub composer: Arc<PromptComposer>,
    pub formatter: Arc<PlatformFormatter>,
    pub config: Config,
}
