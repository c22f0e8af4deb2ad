use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The coach the posts are written as. There is exactly one per library.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CoachProfile {
    pub name: String,
    pub school_name: String,
    pub team_name: String,
    pub email: Option<String>,
    pub social_handle: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `PUT /api/v1/profile`. Replaces the stored profile.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileInput {
    pub name: String,
    #[serde(default = "default_school_name")]
    pub school_name: String,
    #[serde(default = "default_team_name")]
    pub team_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub social_handle: Option<String>,
}

impl ProfileInput {
    /// Profile with the stock school and team names.
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            school_name: default_school_name(),
            team_name: default_team_name(),
            email: None,
            social_handle: None,
        }
    }

    /// Trims every field and drops blank optional ones.
    pub fn normalized(self) -> Self {
        let optional = |v: Option<String>| v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
        Self {
            name: self.name.trim().to_string(),
            school_name: self.school_name.trim().to_string(),
            team_name: self.team_name.trim().to_string(),
            email: optional(self.email),
            social_handle: optional(self.social_handle),
        }
    }
}

fn default_school_name() -> String {
    "High School".to_string()
}

fn default_team_name() -> String {
    "Bowling Team".to_string()
}
