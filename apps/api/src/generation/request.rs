//! Inputs to the Prompt Composer.

use serde::{Deserialize, Serialize};

use crate::formatting::Platform;

pub const DEFAULT_AUDIENCE: &str = "high school bowlers";
pub const DEFAULT_COACH_NAME: &str = "Coach";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PostType {
    #[serde(rename = "Tip of the Day")]
    TipOfTheDay,
    #[serde(rename = "Motivational")]
    Motivational,
    #[serde(rename = "Technique Deep Dive")]
    TechniqueDeepDive,
    #[serde(rename = "Team Achievement")]
    TeamAchievement,
    #[serde(rename = "Practice Drill")]
    PracticeDrill,
    #[serde(rename = "Mental Game")]
    MentalGame,
    #[serde(rename = "Equipment Advice")]
    EquipmentAdvice,
    #[serde(rename = "Event Announcement")]
    EventAnnouncement,
    #[serde(rename = "Season Reflection")]
    SeasonReflection,
}

impl PostType {
    pub const ALL: [PostType; 9] = [
        PostType::TipOfTheDay,
        PostType::Motivational,
        PostType::TechniqueDeepDive,
        PostType::TeamAchievement,
        PostType::PracticeDrill,
        PostType::MentalGame,
        PostType::EquipmentAdvice,
        PostType::EventAnnouncement,
        PostType::SeasonReflection,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PostType::TipOfTheDay => "Tip of the Day",
            PostType::Motivational => "Motivational",
            PostType::TechniqueDeepDive => "Technique Deep Dive",
            PostType::TeamAchievement => "Team Achievement",
            PostType::PracticeDrill => "Practice Drill",
            PostType::MentalGame => "Mental Game",
            PostType::EquipmentAdvice => "Equipment Advice",
            PostType::EventAnnouncement => "Event Announcement",
            PostType::SeasonReflection => "Season Reflection",
        }
    }

    pub fn from_label(label: &str) -> Option<PostType> {
        PostType::ALL.into_iter().find(|p| p.label() == label)
    }
}

impl std::fmt::Display for PostType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
    #[default]
    #[serde(rename = "All Levels")]
    AllLevels,
}

impl SkillLevel {
    pub const ALL: [SkillLevel; 4] = [
        SkillLevel::Beginner,
        SkillLevel::Intermediate,
        SkillLevel::Advanced,
        SkillLevel::AllLevels,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SkillLevel::Beginner => "Beginner",
            SkillLevel::Intermediate => "Intermediate",
            SkillLevel::Advanced => "Advanced",
            SkillLevel::AllLevels => "All Levels",
        }
    }

    pub fn from_label(label: &str) -> Option<SkillLevel> {
        SkillLevel::ALL.into_iter().find(|s| s.label() == label)
    }

    /// Audience line the UI builds from a skill level, e.g. "high school bowlers (Beginner)".
    pub fn audience(&self) -> String {
        format!("{DEFAULT_AUDIENCE} ({})", self.label())
    }
}

/// Instruction to transform previously generated content instead of writing fresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RegenerationDirective {
    Shorter,
    Nicer,
    Hipper,
    ChangePersonality,
    Facebook,
    Instagram,
    Twitter,
    Reddit,
}

impl RegenerationDirective {
    pub const ALL: [RegenerationDirective; 8] = [
        RegenerationDirective::Shorter,
        RegenerationDirective::Nicer,
        RegenerationDirective::Hipper,
        RegenerationDirective::ChangePersonality,
        RegenerationDirective::Facebook,
        RegenerationDirective::Instagram,
        RegenerationDirective::Twitter,
        RegenerationDirective::Reddit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RegenerationDirective::Shorter => "shorter",
            RegenerationDirective::Nicer => "nicer",
            RegenerationDirective::Hipper => "hipper",
            RegenerationDirective::ChangePersonality => "change-personality",
            RegenerationDirective::Facebook => "facebook",
            RegenerationDirective::Instagram => "instagram",
            RegenerationDirective::Twitter => "twitter",
            RegenerationDirective::Reddit => "reddit",
        }
    }

    /// Platform a platform-rewrite directive targets, if it is one.
    pub fn target_platform(&self) -> Option<Platform> {
        match self {
            RegenerationDirective::Facebook => Some(Platform::Facebook),
            RegenerationDirective::Instagram => Some(Platform::Instagram),
            RegenerationDirective::Twitter => Some(Platform::Twitter),
            RegenerationDirective::Reddit => Some(Platform::Reddit),
            _ => None,
        }
    }
}

/// Everything the composer needs to render one prompt.
///
/// No combination of fields is invalid. Absent optional fields drop their section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptRequest {
    pub post_type: PostType,
    pub topic: String,
    #[serde(default = "default_audience")]
    pub audience: String,
    #[serde(default)]
    pub additional_context: Option<String>,
    #[serde(default = "default_coach_name")]
    pub coach_name: String,
    #[serde(default)]
    pub persona_id: Option<String>,
    #[serde(default)]
    pub platform: Platform,
    #[serde(default)]
    pub regeneration: Option<RegenerationDirective>,
    /// Required for `regeneration` to have any effect.
    #[serde(default)]
    pub prior_content: Option<String>,
    /// Pre-rendered reference-resource block.
    #[serde(default)]
    pub reference_text: Option<String>,
}

impl PromptRequest {
    pub fn new(post_type: PostType, topic: impl Into<String>) -> Self {
        Self {
            post_type,
            topic: topic.into(),
            audience: default_audience(),
            additional_context: None,
            coach_name: default_coach_name(),
            persona_id: None,
            platform: Platform::Standard,
            regeneration: None,
            prior_content: None,
            reference_text: None,
        }
    }

    /// The regeneration directive, only when there is non-blank prior content to act on.
    pub fn effective_regeneration(&self) -> Option<(RegenerationDirective, &str)> {
        let directive = self.regeneration?;
        let prior = self.prior_content.as_deref().map(str::trim)?;
        if prior.is_empty() {
            return None;
        }
        Some((directive, prior))
    }
}

fn default_audience() -> String {
    DEFAULT_AUDIENCE.to_string()
}

fn default_coach_name() -> String {
    DEFAULT_COACH_NAME.to_string()
}
