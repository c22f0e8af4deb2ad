//! Library: saved posts and reference resources.
//!
//! Handlers only see `Arc<dyn LibraryStore>`. `PgLibraryStore` backs it when a
//! database is configured, `InMemoryLibraryStore` otherwise.

pub mod handlers;
pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::models::post::{GeneratedPostRow, NewPost, PostStatus};
use crate::models::profile::{CoachProfile, ProfileInput};
use crate::models::resource::{NewResource, ResourceRow, ResourceUpdate};

pub use memory::InMemoryLibraryStore;
pub use postgres::PgLibraryStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: Uuid },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait LibraryStore: Send + Sync {
    // ── Posts ──
    async fn add_post(&self, post: NewPost) -> Result<GeneratedPostRow, StoreError>;
    async fn get_post(&self, id: Uuid) -> Result<GeneratedPostRow, StoreError>;
    /// Newest first.
    async fn list_posts(&self, status: PostStatus) -> Result<Vec<GeneratedPostRow>, StoreError>;
    /// Idempotent: an already-used post keeps its original `used_at`.
    async fn mark_post_used(&self, id: Uuid) -> Result<GeneratedPostRow, StoreError>;
    async fn delete_post(&self, id: Uuid) -> Result<(), StoreError>;

    // ── Resources ──
    async fn add_resource(&self, resource: NewResource) -> Result<ResourceRow, StoreError>;
    async fn get_resource(&self, id: Uuid) -> Result<ResourceRow, StoreError>;
    /// Oldest first, so the seeded links lead the list.
    async fn list_resources(&self) -> Result<Vec<ResourceRow>, StoreError>;
    async fn update_resource(&self, id: Uuid, update: ResourceUpdate) -> Result<ResourceRow, StoreError>;
    async fn delete_resource(&self, id: Uuid) -> Result<(), StoreError>;

    // ── Coach profile ──
    /// `None` until a profile has been saved or seeded.
    async fn get_profile(&self) -> Result<Option<CoachProfile>, StoreError>;
    /// Replaces the profile, creating it if missing.
    async fn save_profile(&self, profile: ProfileInput) -> Result<CoachProfile, StoreError>;
}

/// The USBC links every new library starts with.
pub fn default_resources() -> Vec<NewResource> {
    const DEFAULTS: &[(&str, &str, &str, &[&str])] = &[
        (
            "USBC Bowling Fundamentals",
            "https://bowl.com/welcome/bowling-fundamentals",
            "Fundamentals",
            &["basics", "technique"],
        ),
        (
            "Etiquette and Lingo",
            "https://bowl.com/welcome/etiquette-and-lingo",
            "Etiquette",
            &["rules", "sportsmanship"],
        ),
        (
            "Basic Rules",
            "https://bowl.com/welcome/basic-rules",
            "Rules",
            &["basics", "rules"],
        ),
        (
            "Fundamental Coaching",
            "https://bowl.com/coaching/fundamental/",
            "Coaching",
            &["coaching", "beginner"],
        ),
        (
            "Intermediate Coaching",
            "https://bowl.com/coaching/intermediate/",
            "Coaching",
            &["coaching", "intermediate"],
        ),
        (
            "Advanced Coaching",
            "https://bowl.com/coaching/advanced/",
            "Coaching",
            &["coaching", "advanced"],
        ),
        (
            "Physical Fitness for Bowling",
            "https://images.bowl.com/bowl/media/legacy/internap/bowl/coaching/pdfs/Physical_Fitness.pdf",
            "Fitness",
            &["fitness", "training"],
        ),
    ];

    DEFAULTS
        .iter()
        .map(|(title, url, category, tags)| NewResource {
            title: title.to_string(),
            url: url.to_string(),
            category: category.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        })
        .collect()
}

/// Inserts the default resources if the store has none.
pub async fn seed_default_resources(store: &dyn LibraryStore) -> Result<usize, StoreError> {
    if !store.list_resources().await?.is_empty() {
        return Ok(0);
    }

    let defaults = default_resources();
    let count = defaults.len();
    for resource in defaults {
        store.add_resource(resource).await?;
    }

    info!("Seeded {count} default resources");
    Ok(count)
}

/// Creates the coach profile from `default_name` unless one is already stored.
/// Returns whether a profile was created.
pub async fn seed_profile(store: &dyn LibraryStore, default_name: &str) -> Result<bool, StoreError> {
    if store.get_profile().await?.is_some() {
        return Ok(false);
    }

    store.save_profile(ProfileInput::named(default_name)).await?;
    info!("Seeded coach profile for '{default_name}'");
    Ok(true)
}

/// Name posts are signed with when a request names no coach.
pub async fn default_coach_name(store: &dyn LibraryStore, fallback: &str) -> Result<String, StoreError> {
    Ok(store
        .get_profile()
        .await?
        .map(|p| p.name)
        .unwrap_or_else(|| fallback.to_string()))
}
