//! Post generation: orchestrates compose → LLM → format → persist.
//!
//! Flow: load selected resources → fetch their text → render reference block →
//!       compose prompt → LLM generate → format for platform → save to library.
//!
//! Regeneration loads a saved post, applies a directive (persona rotation or a
//! platform switch where relevant) and runs the same flow with the prior content.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::formatting::{FormattedPost, Platform, PlatformFormatter};
use crate::generation::composer::PromptComposer;
use crate::generation::request::{PostType, PromptRequest, RegenerationDirective, SkillLevel};
use crate::library::LibraryStore;
use crate::llm_client::TextGenerator;
use crate::models::post::{GeneratedPostRow, NewPost};
use crate::resources::{format_resources_for_prompt, ReferenceResource, ResourceFetcher};

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Request body for fresh post generation.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratePostRequest {
    pub post_type: PostType,
    pub topic: String,
    /// Topic category the UI picked the topic from, stored for filtering.
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub skill_level: SkillLevel,
    /// Overrides the audience derived from `skill_level`.
    #[serde(default)]
    pub audience: Option<String>,
    #[serde(default)]
    pub additional_context: Option<String>,
    #[serde(default)]
    pub coach_name: Option<String>,
    #[serde(default)]
    pub persona_id: Option<String>,
    #[serde(default)]
    pub platform: Platform,
    /// Library resources to fetch and feed into the prompt.
    #[serde(default)]
    pub resource_ids: Vec<Uuid>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Request body for regenerating a saved post.
#[derive(Debug, Clone, Deserialize)]
pub struct RegeneratePostRequest {
    pub directive: RegenerationDirective,
    #[serde(default)]
    pub coach_name: Option<String>,
    #[serde(default)]
    pub resource_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerationOutcome {
    pub post: GeneratedPostRow,
    pub formatted: FormattedPost,
}

/// Collaborators the pipeline needs. Borrowed from `AppState` by the handlers.
pub struct Pipeline<'a> {
    pub store: &'a dyn LibraryStore,
    pub llm: &'a dyn TextGenerator,
    pub fetcher: &'a ResourceFetcher,
    pub composer: &'a PromptComposer,
    pub formatter: &'a PlatformFormatter,
    pub default_coach_name: &'a str,
}

// ────────────────────────────────────────────────────────────────────────────
// Generation pipeline
// ────────────────────────────────────────────────────────────────────────────

impl Pipeline<'_> {
    /// Generates a new post and saves it to the library.
    pub async fn generate_post(
        &self,
        request: GeneratePostRequest,
        api_key: Option<&str>,
    ) -> Result<GenerationOutcome, AppError> {
        if request.topic.trim().is_empty() {
            return Err(AppError::Validation("topic cannot be empty".to_string()));
        }

        let reference_text = self.reference_text(&request.resource_ids).await?;
        let prompt_request = self.prompt_request_for(&request, reference_text);

        info!(
            "Generating '{}' post on '{}' for {} (persona: {})",
            request.post_type,
            request.topic,
            request.platform,
            request.persona_id.as_deref().unwrap_or("default")
        );

        let prompt = self.composer.compose(&prompt_request);
        let content = self.llm.generate(&prompt, api_key).await?;

        let tags = with_tags(
            request.tags,
            [
                Some(request.post_type.label().to_string()),
                request.category.clone(),
                Some(request.skill_level.label().to_string()),
                request.persona_id.clone(),
            ],
        );

        self.save(
            content,
            NewPost {
                content: String::new(),
                post_type: request.post_type.label().to_string(),
                skill_level: request.skill_level.label().to_string(),
                topic: request.topic,
                category: request.category,
                persona_id: request.persona_id,
                audience: non_blank(request.audience),
                additional_context: non_blank(request.additional_context),
                platform: request.platform.as_str().to_string(),
                tags,
            },
        )
        .await
    }

    /// Rewrites a saved post according to `request.directive` and saves the result as a new post.
    pub async fn regenerate_post(
        &self,
        post_id: Uuid,
        request: RegeneratePostRequest,
        api_key: Option<&str>,
    ) -> Result<GenerationOutcome, AppError> {
        let prior = self.store.get_post(post_id).await?;

        let post_type = PostType::from_label(&prior.post_type).ok_or_else(|| {
            AppError::Validation(format!("Post {post_id} has unknown post type '{}'", prior.post_type))
        })?;
        let skill_level = SkillLevel::from_label(&prior.skill_level).unwrap_or_default();
        let (persona_id, platform) = self.apply_directive(&prior, request.directive);

        let mut prompt_request = PromptRequest::new(post_type, prior.topic.clone());
        prompt_request.audience = prior
            .audience
            .clone()
            .unwrap_or_else(|| skill_level.audience());
        prompt_request.additional_context = prior.additional_context.clone();
        prompt_request.coach_name = self.coach_name(request.coach_name.as_deref());
        prompt_request.persona_id = persona_id.clone();
        prompt_request.platform = platform;
        prompt_request.regeneration = Some(request.directive);
        prompt_request.prior_content = Some(prior.content.clone());
        prompt_request.reference_text = self.reference_text(&request.resource_ids).await?;

        info!(
            "Regenerating post {post_id} ({}) for {platform}",
            request.directive.as_str()
        );

        let prompt = self.composer.compose(&prompt_request);
        let content = self.llm.generate(&prompt, api_key).await?;

        let tags = with_tags(
            prior.tags,
            [persona_id.clone(), Some(request.directive.as_str().to_string())],
        );

        self.save(
            content,
            NewPost {
                content: String::new(),
                post_type: prior.post_type,
                skill_level: prior.skill_level,
                topic: prior.topic,
                category: prior.category,
                persona_id,
                audience: prior.audience,
                additional_context: prior.additional_context,
                platform: platform.as_str().to_string(),
                tags,
            },
        )
        .await
    }

    /// Persona and platform the regenerated post will use.
    fn apply_directive(
        &self,
        prior: &GeneratedPostRow,
        directive: RegenerationDirective,
    ) -> (Option<String>, Platform) {
        let platform = directive
            .target_platform()
            .unwrap_or_else(|| Platform::from_id(&prior.platform));

        let persona_id = match directive {
            RegenerationDirective::ChangePersonality => self
                .composer
                .catalog()
                .personas
                .next_after(prior.persona_id.as_deref())
                .map(|p| p.id.clone())
                .or_else(|| prior.persona_id.clone()),
            _ => prior.persona_id.clone(),
        };

        (persona_id, platform)
    }

    fn prompt_request_for(
        &self,
        request: &GeneratePostRequest,
        reference_text: Option<String>,
    ) -> PromptRequest {
        let mut prompt_request = PromptRequest::new(request.post_type, request.topic.trim());
        prompt_request.audience = non_blank(request.audience.clone())
            .unwrap_or_else(|| request.skill_level.audience());
        prompt_request.additional_context = non_blank(request.additional_context.clone());
        prompt_request.coach_name = self.coach_name(request.coach_name.as_deref());
        prompt_request.persona_id = request.persona_id.clone();
        prompt_request.platform = request.platform;
        prompt_request.reference_text = reference_text;
        prompt_request
    }

    fn coach_name(&self, requested: Option<&str>) -> String {
        requested
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(self.default_coach_name)
            .to_string()
    }

    /// Loads the selected resources and renders whatever could be fetched.
    /// Unreachable resources are skipped; unknown ids are an error.
    async fn reference_text(&self, resource_ids: &[Uuid]) -> Result<Option<String>, AppError> {
        if resource_ids.is_empty() {
            return Ok(None);
        }

        let mut rows = Vec::with_capacity(resource_ids.len());
        for id in resource_ids {
            rows.push(self.store.get_resource(*id).await?);
        }

        let urls: Vec<String> = rows.iter().map(|r| r.url.clone()).collect();
        let fetched = self.fetcher.fetch_all(&urls).await;

        let references: Vec<ReferenceResource> = rows
            .into_iter()
            .zip(fetched)
            .filter_map(|(row, result)| {
                result.ok().map(|f| ReferenceResource {
                    // the library title wins; the page <title> only fills a blank one
                    title: Some(row.title)
                        .filter(|t| !t.trim().is_empty())
                        .or(f.title)
                        .unwrap_or_else(|| f.url.clone()),
                    url: f.url,
                    content: f.content,
                })
            })
            .collect();

        if references.len() < resource_ids.len() {
            warn!(
                "Using {} of {} selected resources",
                references.len(),
                resource_ids.len()
            );
        }

        Ok(format_resources_for_prompt(&references))
    }

    async fn save(&self, content: String, mut post: NewPost) -> Result<GenerationOutcome, AppError> {
        let formatted = self
            .formatter
            .format(&content, Platform::from_id(&post.platform));
        post.content = content;

        let post = self.store.add_post(post).await?;
        info!(
            "Saved post {} ({} chars, {} words)",
            post.id, formatted.metrics.character_count, formatted.metrics.word_count
        );

        Ok(GenerationOutcome { post, formatted })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Appends `extra` to `tags`, skipping blanks and tags already present.
fn with_tags(mut tags: Vec<String>, extra: impl IntoIterator<Item = Option<String>>) -> Vec<String> {
    for tag in extra.into_iter().flatten() {
        let tag = tag.trim();
        if !tag.is_empty() && !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::formatting::FormatterRules;
    use crate::generation::catalog::PromptCatalog;
    use crate::library::InMemoryLibraryStore;
    use crate::llm_client::LlmError;
    use crate::models::post::PostStatus;

    /// Records prompts and answers with a fixed reply.
    struct CannedGenerator {
        reply: String,
        prompts: Mutex<Vec<String>>,
    }

    impl CannedGenerator {
        fn new(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn last_prompt(&self) -> String {
            self.prompts.lock().unwrap().last().cloned().unwrap_or_default()
        }
    }

    #[async_trait]
    impl TextGenerator for CannedGenerator {
        async fn generate(&self, prompt: &str, _key: Option<&str>) -> Result<String, LlmError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(self.reply.clone())
        }
    }

    struct Fixture {
        store: InMemoryLibraryStore,
        llm: CannedGenerator,
        fetcher: ResourceFetcher,
        composer: PromptComposer,
        formatter: PlatformFormatter,
    }

    impl Fixture {
        fn new(reply: &str) -> Self {
            Self {
                store: InMemoryLibraryStore::new(),
                llm: CannedGenerator::new(reply),
                fetcher: ResourceFetcher::new(Duration::from_secs(1), 3000).unwrap(),
                composer: PromptComposer::new(PromptCatalog::bowling()),
                formatter: PlatformFormatter::new(FormatterRules::default()),
            }
        }

        fn pipeline(&self) -> Pipeline<'_> {
            Pipeline {
                store: &self.store,
                llm: &self.llm,
                fetcher: &self.fetcher,
                composer: &self.composer,
                formatter: &self.formatter,
                default_coach_name: "Coach Riley",
            }
        }
    }

    fn generate_request() -> GeneratePostRequest {
        GeneratePostRequest {
            post_type: PostType::PracticeDrill,
            topic: "Spare Shooting".to_string(),
            category: Some("Fundamentals".to_string()),
            skill_level: SkillLevel::Beginner,
            audience: None,
            additional_context: None,
            coach_name: None,
            persona_id: Some("competitive-grinder".to_string()),
            platform: Platform::Facebook,
            resource_ids: vec![],
            tags: vec!["spares".to_string()],
        }
    }

    #[tokio::test]
    async fn test_generate_post_composes_formats_and_saves() {
        let fx = Fixture::new("Pick up that 10-pin! Walk the angle and trust your line.");
        let outcome = fx.pipeline().generate_post(generate_request(), None).await.unwrap();

        let prompt = fx.llm.last_prompt();
        assert!(prompt.starts_with("You are Coach Riley, a Competitive Grinder."));
        assert!(prompt.contains("high school bowlers (Beginner)"));
        assert!(prompt.contains("PLATFORM FORMAT: Facebook"));

        assert_eq!(outcome.post.post_type, "Practice Drill");
        assert_eq!(outcome.post.platform, "facebook");
        assert_eq!(
            outcome.post.tags,
            vec![
                "spares",
                "Practice Drill",
                "Fundamentals",
                "Beginner",
                "competitive-grinder"
            ]
        );
        assert_eq!(outcome.post.audience, None);
        assert_eq!(outcome.formatted.platform, Platform::Facebook);
        assert_eq!(outcome.formatted.metrics.word_count, 11);

        let saved = fx.store.list_posts(PostStatus::All).await.unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].content, outcome.post.content);
    }

    #[tokio::test]
    async fn test_generate_post_rejects_blank_topic() {
        let fx = Fixture::new("unused");
        let mut req = generate_request();
        req.topic = "  ".to_string();
        let err = fx.pipeline().generate_post(req, None).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(fx.llm.last_prompt().is_empty());
    }

    #[tokio::test]
    async fn test_explicit_audience_wins_over_skill_level() {
        let fx = Fixture::new("post");
        let mut req = generate_request();
        req.audience = Some("middle school league bowlers".to_string());
        fx.pipeline().generate_post(req, None).await.unwrap();
        let prompt = fx.llm.last_prompt();
        assert!(prompt.contains("middle school league bowlers"));
        assert!(!prompt.contains("(Beginner)"));
    }

    #[tokio::test]
    async fn test_unknown_resource_id_is_not_found() {
        let fx = Fixture::new("post");
        let mut req = generate_request();
        req.resource_ids = vec![Uuid::new_v4()];
        let err = fx.pipeline().generate_post(req, None).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_change_personality_rotates_persona() {
        let fx = Fixture::new("first draft");
        let first = fx.pipeline().generate_post(generate_request(), None).await.unwrap();

        let outcome = fx
            .pipeline()
            .regenerate_post(
                first.post.id,
                RegeneratePostRequest {
                    directive: RegenerationDirective::ChangePersonality,
                    coach_name: None,
                    resource_ids: vec![],
                },
                None,
            )
            .await
            .unwrap();

        // competitive-grinder is followed by next-gen-hotshot in the built-in catalog
        assert_eq!(outcome.post.persona_id.as_deref(), Some("next-gen-hotshot"));
        let prompt = fx.llm.last_prompt();
        assert!(prompt.contains("REGENERATE INSTRUCTION"));
        assert!(prompt.contains("Previous post:\nfirst draft"));
        assert_ne!(outcome.post.id, first.post.id);
        assert!(outcome.post.tags.contains(&"next-gen-hotshot".to_string()));
        assert_eq!(outcome.post.tags.last().map(String::as_str), Some("change-personality"));
    }

    #[tokio::test]
    async fn test_regenerate_keeps_context_and_audience() {
        let fx = Fixture::new("first draft");
        let mut req = generate_request();
        req.additional_context = Some("Regionals are Saturday".to_string());
        req.audience = Some("middle school league bowlers".to_string());
        let first = fx.pipeline().generate_post(req, None).await.unwrap();
        assert_eq!(first.post.additional_context.as_deref(), Some("Regionals are Saturday"));

        let outcome = fx
            .pipeline()
            .regenerate_post(
                first.post.id,
                RegeneratePostRequest {
                    directive: RegenerationDirective::Shorter,
                    coach_name: None,
                    resource_ids: vec![],
                },
                None,
            )
            .await
            .unwrap();

        let prompt = fx.llm.last_prompt();
        assert!(prompt.contains("Regionals are Saturday"));
        assert!(prompt.contains("middle school league bowlers"));
        assert!(!prompt.contains("(Beginner)"));
        assert_eq!(
            outcome.post.additional_context.as_deref(),
            Some("Regionals are Saturday")
        );
        assert_eq!(outcome.post.tags.last().map(String::as_str), Some("shorter"));
        assert_eq!(
            outcome.post.tags.iter().filter(|t| *t == "competitive-grinder").count(),
            1
        );
    }

    #[tokio::test]
    async fn test_platform_directive_switches_platform() {
        let fx = Fixture::new("short");
        let first = fx.pipeline().generate_post(generate_request(), None).await.unwrap();

        let outcome = fx
            .pipeline()
            .regenerate_post(
                first.post.id,
                RegeneratePostRequest {
                    directive: RegenerationDirective::Twitter,
                    coach_name: Some("Coach Sam".to_string()),
                    resource_ids: vec![],
                },
                None,
            )
            .await
            .unwrap();

        assert_eq!(outcome.post.platform, "twitter");
        assert_eq!(outcome.post.persona_id.as_deref(), Some("competitive-grinder"));
        assert_eq!(outcome.formatted.metrics.thread_count, Some(1));
        assert!(fx.llm.last_prompt().starts_with("You are Coach Sam"));
    }

    #[tokio::test]
    async fn test_regenerate_missing_post_is_not_found() {
        let fx = Fixture::new("x");
        let err = fx
            .pipeline()
            .regenerate_post(
                Uuid::new_v4(),
                RegeneratePostRequest {
                    directive: RegenerationDirective::Shorter,
                    coach_name: None,
                    resource_ids: vec![],
                },
                None,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
