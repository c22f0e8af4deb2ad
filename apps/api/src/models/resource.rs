use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResourceRow {
    pub id: Uuid,
    pub title: String,
    pub url: String,
    pub category: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewResource {
    pub title: String,
    pub url: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResourceUpdate {
    pub title: Option<String>,
    pub url: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl ResourceUpdate {
    pub fn apply(self, row: &mut ResourceRow) {
        if let Some(title) = self.title {
            row.title = title;
        }
        if let Some(url) = self.url {
            row.url = url;
        }
        if let Some(category) = self.category {
            row.category = category;
        }
        if let Some(tags) = self.tags {
            row.tags = tags;
        }
    }
}

fn default_category() -> String {
    "General".to_string()
}
