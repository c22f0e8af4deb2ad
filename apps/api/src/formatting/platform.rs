//! Target platforms and their display metadata.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// A social-media display context. `Standard` means no platform-specific handling.
///
/// Deserialization never fails: an unrecognised id resolves to `Standard`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Platform {
    #[default]
    Standard,
    Facebook,
    Instagram,
    Twitter,
    Reddit,
}

impl Platform {
    pub const ALL: [Platform; 5] = [
        Platform::Standard,
        Platform::Facebook,
        Platform::Instagram,
        Platform::Twitter,
        Platform::Reddit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Standard => "standard",
            Platform::Facebook => "facebook",
            Platform::Instagram => "instagram",
            Platform::Twitter => "twitter",
            Platform::Reddit => "reddit",
        }
    }

    /// Resolves a platform id. Unknown or empty ids fall back to `Standard`.
    pub fn from_id(id: &str) -> Platform {
        let normalized = id.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "standard" | "" => Platform::Standard,
            "facebook" => Platform::Facebook,
            "instagram" => Platform::Instagram,
            "twitter" | "x" => Platform::Twitter,
            "reddit" => Platform::Reddit,
            other => {
                debug!("Unknown platform id '{other}', using standard");
                Platform::Standard
            }
        }
    }

    pub fn info(&self) -> PlatformInfo {
        match self {
            Platform::Facebook => PlatformInfo {
                platform: *self,
                name: "Facebook",
                emoji: "📘",
                color: "#1877F2",
                preview_note: "First ~140 chars shown before \"See More\"",
                max_length: None,
            },
            Platform::Instagram => PlatformInfo {
                platform: *self,
                name: "Instagram",
                emoji: "📸",
                color: "#E4405F",
                preview_note: "First ~125 chars shown before \"more\"",
                max_length: Some(2200),
            },
            Platform::Twitter => PlatformInfo {
                platform: *self,
                name: "Twitter/X",
                emoji: "𝕏",
                color: "#000000",
                preview_note: "280 characters per tweet",
                max_length: Some(280),
            },
            Platform::Reddit => PlatformInfo {
                platform: *self,
                name: "Reddit",
                emoji: "👽",
                color: "#FF4500",
                preview_note: "Title plus full body, no preview fold",
                max_length: Some(40000),
            },
            Platform::Standard => PlatformInfo {
                platform: *self,
                name: "Standard",
                emoji: "📱",
                color: "#6B7280",
                preview_note: "No platform-specific formatting",
                max_length: None,
            },
        }
    }
}

impl From<String> for Platform {
    fn from(id: String) -> Self {
        Platform::from_id(&id)
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display metadata for the UI picker.
#[derive(Debug, Clone, Serialize)]
pub struct PlatformInfo {
    pub platform: Platform,
    pub name: &'static str,
    pub emoji: &'static str,
    pub color: &'static str,
    pub preview_note: &'static str,
    pub max_length: Option<u32>,
}
