//! Axum route handlers for prompt composition and post generation.

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::formatting::platform::PlatformInfo;
use crate::formatting::Platform;
use crate::generation::catalog::{PersonaDescriptor, TopicCategory, BOWLING_TOPICS};
use crate::generation::generator::{
    GeneratePostRequest, GenerationOutcome, Pipeline, RegeneratePostRequest,
};
use crate::generation::request::{PostType, PromptRequest, RegenerationDirective, SkillLevel};
use crate::library::default_coach_name;
use crate::state::AppState;

/// Per-request Gemini key; overrides `GEMINI_API_KEY`.
pub const API_KEY_HEADER: &str = "x-gemini-api-key";

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub personas: Vec<PersonaDescriptor>,
    pub post_types: Vec<&'static str>,
    pub skill_levels: Vec<&'static str>,
    pub topics: &'static [TopicCategory],
    pub platforms: Vec<PlatformInfo>,
    pub regeneration_directives: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct PromptPreviewResponse {
    pub prompt: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/catalog
///
/// Everything the UI pickers need: personas, post types, skill levels, topics, platforms.
pub async fn handle_catalog(State(state): State<AppState>) -> Json<CatalogResponse> {
    Json(CatalogResponse {
        personas: state.composer.catalog().personas.all().to_vec(),
        post_types: PostType::ALL.iter().map(PostType::label).collect(),
        skill_levels: SkillLevel::ALL.iter().map(SkillLevel::label).collect(),
        topics: BOWLING_TOPICS,
        platforms: Platform::ALL.iter().map(Platform::info).collect(),
        regeneration_directives: RegenerationDirective::ALL
            .iter()
            .map(RegenerationDirective::as_str)
            .collect(),
    })
}

/// POST /api/v1/prompts/preview
///
/// Renders the prompt for a request without calling the LLM.
pub async fn handle_prompt_preview(
    State(state): State<AppState>,
    Json(request): Json<PromptRequest>,
) -> Json<PromptPreviewResponse> {
    Json(PromptPreviewResponse {
        prompt: state.composer.compose(&request),
    })
}

/// POST /api/v1/posts/generate
///
/// Full pipeline: fetch resources → compose → LLM → format → save.
pub async fn handle_generate(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<GeneratePostRequest>,
) -> Result<Json<GenerationOutcome>, AppError> {
    let coach_name = default_coach_name(state.store.as_ref(), &state.config.coach_name).await?;
    let outcome = pipeline(&state, &coach_name)
        .generate_post(request, api_key(&headers))
        .await?;
    Ok(Json(outcome))
}

/// POST /api/v1/posts/:id/regenerate
///
/// Rewrites a saved post per the directive and saves the rewrite as a new post.
pub async fn handle_regenerate(
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
    headers: HeaderMap,
    Json(request): Json<RegeneratePostRequest>,
) -> Result<Json<GenerationOutcome>, AppError> {
    let coach_name = default_coach_name(state.store.as_ref(), &state.config.coach_name).await?;
    let outcome = pipeline(&state, &coach_name)
        .regenerate_post(post_id, request, api_key(&headers))
        .await?;
    Ok(Json(outcome))
}

/// `coach_name` comes from the stored profile.
fn pipeline<'a>(state: &'a AppState, coach_name: &'a str) -> Pipeline<'a> {
    Pipeline {
        store: state.store.as_ref(),
        llm: state.llm.as_ref(),
        fetcher: &state.fetcher,
        composer: &state.composer,
        formatter: &state.formatter,
        default_coach_name: coach_name,
    }
}

fn api_key(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|k| !k.is_empty())
}
