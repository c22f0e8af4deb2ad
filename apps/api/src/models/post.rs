use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A generated post saved to the library.
///
/// `post_type`, `skill_level` and `platform` hold the same labels/ids the API
/// accepts, so rows round-trip through JSON without a mapping layer.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GeneratedPostRow {
    pub id: Uuid,
    pub content: String,
    pub post_type: String,
    pub skill_level: String,
    pub topic: String,
    pub category: Option<String>,
    pub persona_id: Option<String>,
    /// Audience the caller asked for; `None` means derived from `skill_level`.
    pub audience: Option<String>,
    pub additional_context: Option<String>,
    pub platform: String,
    pub tags: Vec<String>,
    pub is_used: bool,
    pub used_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Fields supplied when saving a post; id and timestamps are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub content: String,
    pub post_type: String,
    pub skill_level: String,
    pub topic: String,
    pub category: Option<String>,
    pub persona_id: Option<String>,
    pub audience: Option<String>,
    pub additional_context: Option<String>,
    pub platform: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    All,
    Used,
    Unused,
}

impl PostStatus {
    pub fn matches(&self, post: &GeneratedPostRow) -> bool {
        match self {
            PostStatus::All => true,
            PostStatus::Used => post.is_used,
            PostStatus::Unused => !post.is_used,
        }
    }
}
