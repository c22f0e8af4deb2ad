//! Prompt catalogs: personas, the fallback voice, and the tag → block tables
//! for platforms and regeneration directives.
//!
//! A `PromptCatalog` is plain owned data handed to the composer at construction.
//! `PromptCatalog::bowling()` is the built-in catalog; tests build their own.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::formatting::Platform;
use crate::generation::prompts::{
    FACEBOOK_RULES, INSTAGRAM_RULES, REDDIT_RULES, REGENERATE_CHANGE_PERSONALITY,
    REGENERATE_FACEBOOK, REGENERATE_HIPPER, REGENERATE_INSTAGRAM, REGENERATE_NICER,
    REGENERATE_REDDIT, REGENERATE_SHORTER, REGENERATE_TWITTER, TWITTER_RULES,
};
use crate::generation::request::RegenerationDirective;

/// A named voice used to colour generated posts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonaDescriptor {
    pub id: String,
    pub name: String,
    pub emoji: String,
    pub description: String,
    pub tone: String,
    pub style: String,
    pub specializations: Vec<String>,
}

/// The generic coaching voice used when no catalog persona applies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultVoice {
    pub role: String,
    pub tone: String,
    pub expertise: Vec<String>,
}

impl Default for DefaultVoice {
    fn default() -> Self {
        Self {
            role: "an experienced High School Bowling Coach with USBC certification".to_string(),
            tone: "Encouraging, knowledgeable, and supportive".to_string(),
            expertise: strings(&[
                "USBC Certified Coaching techniques",
                "Bowling fundamentals and mechanics",
                "Youth bowling development",
                "Team building and motivation",
                "Competitive strategy",
                "Physical fitness for bowling",
            ]),
        }
    }
}

/// Outcome of persona resolution. The fallback is an explicit variant, not a silent default.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResolvedVoice<'a> {
    Persona(&'a PersonaDescriptor),
    Default(&'a DefaultVoice),
}

/// Ordered list of personas.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonaCatalog {
    personas: Vec<PersonaDescriptor>,
}

impl PersonaCatalog {
    pub fn new(personas: Vec<PersonaDescriptor>) -> Self {
        Self { personas }
    }

    pub fn all(&self) -> &[PersonaDescriptor] {
        &self.personas
    }

    pub fn get(&self, id: &str) -> Option<&PersonaDescriptor> {
        self.personas.iter().find(|p| p.id == id)
    }

    /// Next persona after `current` in catalog order, wrapping around.
    /// Unknown or absent `current` starts from the first persona.
    /// Returns `None` only when the catalog is empty or `current` is its single entry.
    pub fn next_after(&self, current: Option<&str>) -> Option<&PersonaDescriptor> {
        let position = current.and_then(|id| self.personas.iter().position(|p| p.id == id));
        let next = match position {
            Some(i) => self.personas.get((i + 1) % self.personas.len())?,
            None => self.personas.first()?,
        };
        if Some(next.id.as_str()) == current {
            return None;
        }
        Some(next)
    }
}

/// Everything the composer looks up: personas, fallback voice, and the enum-keyed blocks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptCatalog {
    pub personas: PersonaCatalog,
    pub default_voice: DefaultVoice,
    /// Formatting instructions per platform. `Standard` has no entry.
    pub platform_rules: BTreeMap<Platform, String>,
    /// Regeneration instructions per directive; `{previous_content}` is substituted.
    pub regeneration_templates: BTreeMap<RegenerationDirective, String>,
}

impl PromptCatalog {
    /// Resolves a persona id. Absent or unknown ids resolve to the default voice.
    pub fn resolve_voice(&self, persona_id: Option<&str>) -> ResolvedVoice<'_> {
        match persona_id.and_then(|id| self.personas.get(id)) {
            Some(persona) => ResolvedVoice::Persona(persona),
            None => {
                if let Some(id) = persona_id {
                    debug!("Persona '{id}' not in catalog, using default voice");
                }
                ResolvedVoice::Default(&self.default_voice)
            }
        }
    }

    pub fn platform_rules(&self, platform: Platform) -> Option<&str> {
        self.platform_rules.get(&platform).map(String::as_str)
    }

    pub fn regeneration_template(&self, directive: RegenerationDirective) -> Option<&str> {
        self.regeneration_templates
            .get(&directive)
            .map(String::as_str)
    }

    /// The built-in bowling-coach catalog.
    pub fn bowling() -> Self {
        let platform_rules = BTreeMap::from([
            (Platform::Facebook, FACEBOOK_RULES.to_string()),
            (Platform::Instagram, INSTAGRAM_RULES.to_string()),
            (Platform::Twitter, TWITTER_RULES.to_string()),
            (Platform::Reddit, REDDIT_RULES.to_string()),
        ]);

        let regeneration_templates = BTreeMap::from([
            (RegenerationDirective::Shorter, REGENERATE_SHORTER.to_string()),
            (RegenerationDirective::Nicer, REGENERATE_NICER.to_string()),
            (RegenerationDirective::Hipper, REGENERATE_HIPPER.to_string()),
            (
                RegenerationDirective::ChangePersonality,
                REGENERATE_CHANGE_PERSONALITY.to_string(),
            ),
            (RegenerationDirective::Facebook, REGENERATE_FACEBOOK.to_string()),
            (RegenerationDirective::Instagram, REGENERATE_INSTAGRAM.to_string()),
            (RegenerationDirective::Twitter, REGENERATE_TWITTER.to_string()),
            (RegenerationDirective::Reddit, REGENERATE_REDDIT.to_string()),
        ]);

        Self {
            personas: PersonaCatalog::new(bowling_personas()),
            default_voice: DefaultVoice::default(),
            platform_rules,
            regeneration_templates,
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn persona(
    id: &str,
    name: &str,
    emoji: &str,
    description: &str,
    tone: &str,
    style: &str,
    specializations: &[&str],
) -> PersonaDescriptor {
    PersonaDescriptor {
        id: id.to_string(),
        name: name.to_string(),
        emoji: emoji.to_string(),
        description: description.to_string(),
        tone: tone.to_string(),
        style: style.to_string(),
        specializations: strings(specializations),
    }
}

fn bowling_personas() -> Vec<PersonaDescriptor> {
    vec![
        persona(
            "old-school-league-bowler",
            "Old School League Bowler",
            "🎳",
            "Thirty years of Tuesday night league wisdom",
            "Wise and experienced, a little gruff, philosophical about the sport",
            "Storytelling approach, draws parallels between bowling and life, patient and thoughtful",
            &["Lane reading mastery", "Spare shooting", "Traditional techniques", "League etiquette"],
        ),
        persona(
            "competitive-grinder",
            "Competitive Grinder",
            "💪",
            "Tournament-tested, practice-obsessed",
            "Intense, disciplined, and direct - no excuses, just reps",
            "Short punchy sentences, practice plans with numbers, celebrates grit over talent",
            &["Tournament preparation", "Practice structure", "Match play tactics", "Mental toughness"],
        ),
        persona(
            "next-gen-hotshot",
            "Next Gen Hotshot",
            "🔥",
            "Speaks fluent Gen Z - no cap, fr fr",
            "Modern, relatable, authentic - uses current slang naturally (no cap, lowkey, highkey, fr, bet)",
            "Casual and conversational, celebrates wins and normalizes struggles, references trending topics",
            &["Social media trends", "Two-handed bowling", "Relatable content", "Hype culture"],
        ),
        persona(
            "team-parent-coach",
            "Team Parent Coach",
            "👪",
            "The volunteer who keeps the whole team together",
            "Warm, organized, and practical - speaks to bowlers and their families",
            "Friendly reminders, logistics made easy, highlights effort and teamwork",
            &["Team logistics", "Parent communication", "Youth development", "Sportsmanship"],
        ),
        persona(
            "recreational-social",
            "Recreational Social",
            "🍕",
            "Bowling is for fun and friends first",
            "Light-hearted, inclusive, and welcoming to total beginners",
            "Jokes and easy tips, never intimidating, focuses on enjoying the game",
            &["Beginner basics", "Bowling etiquette", "Social events", "Fun drills"],
        ),
        persona(
            "tech-data-enthusiast",
            "Tech Data Enthusiast",
            "📊",
            "Rev rates, launch angles, and spreadsheets",
            "Analytical and curious, excited about numbers and measurable improvement",
            "Explains concepts with data, cites stats like rev rate and ball speed, suggests tracking progress",
            &["Ball motion analysis", "Performance tracking", "Rev rate and axis rotation", "Video analysis"],
        ),
        persona(
            "usbc-gold-coach",
            "USBC Gold Coach",
            "🏆",
            "Elite USBC certification expertise",
            "Highly credentialed and authoritative, references USBC standards and best practices",
            "Evidence-based coaching, cites USBC resources, focuses on proper fundamentals and competition prep",
            &[
                "USBC coaching certification",
                "Competition strategy",
                "Youth development programs",
                "Technical fundamentals",
            ],
        ),
        persona(
            "ball-driller-expert",
            "Ball Tech Expert",
            "⚙️",
            "Deep knowledge of ball technology",
            "Technical and detail-oriented, passionate about equipment science",
            "Explains coverstock chemistry, core dynamics, RG/Diff/weights, ball motion characteristics",
            &[
                "Coverstock technology (pearl, solid, hybrid)",
                "Core dynamics (symmetric, asymmetric)",
                "RG and Differential ratings",
                "Ball surface prep",
                "Arsenal building",
                "Lane condition matching",
            ],
        ),
        persona(
            "positive-parent-coach",
            "Positive Parent Coach",
            "🌟",
            "Every frame is a chance to grow",
            "Gentle, upbeat, and confidence-building, focused on growth mindset",
            "Praises effort, reframes mistakes as learning, gives one small next step",
            &["Growth mindset", "Confidence building", "Youth bowlers", "Positive self-talk"],
        ),
        persona(
            "reddit-community",
            "Reddit Community",
            "👽",
            "r/Bowling regular who has seen every question",
            "Candid, helpful, and a bit self-deprecating, like a knowledgeable forum regular",
            "Answers like a top comment: clear structure, honest caveats, invites discussion",
            &["Community Q&A", "Equipment recommendations", "Common mistakes", "Troubleshooting"],
        ),
    ]
}

// ────────────────────────────────────────────────────────────────────────────
// Topic catalog (UI pickers)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct TopicCategory {
    pub name: &'static str,
    pub topics: &'static [&'static str],
}

pub const BOWLING_TOPICS: &[TopicCategory] = &[
    TopicCategory {
        name: "Fundamentals",
        topics: &[
            "Proper Stance",
            "Four-Step Approach",
            "Five-Step Approach",
            "Ball Release",
            "Follow Through",
            "Targeting and Aiming",
            "Lane Reading",
            "Spare Shooting",
        ],
    },
    TopicCategory {
        name: "Advanced Techniques",
        topics: &[
            "Hook Ball Technique",
            "Ball Speed Control",
            "Rev Rate and Axis Rotation",
            "Oil Pattern Adjustment",
            "Ball Surface Changes",
            "Pin Carry Optimization",
            "Arsenal Management",
        ],
    },
    TopicCategory {
        name: "Mental Game",
        topics: &[
            "Pre-Shot Routine",
            "Handling Pressure",
            "Focus and Concentration",
            "Positive Self-Talk",
            "Dealing with Bad Breaks",
            "Competition Mindset",
            "Visualization Techniques",
        ],
    },
    TopicCategory {
        name: "Physical Fitness",
        topics: &[
            "Stretching and Warm-up",
            "Core Strength",
            "Flexibility Training",
            "Injury Prevention",
            "Endurance Building",
            "Balance Exercises",
            "Recovery and Rest",
        ],
    },
    TopicCategory {
        name: "Etiquette & Sportsmanship",
        topics: &[
            "Lane Courtesy",
            "Proper Behavior",
            "Team Support",
            "Respecting Opponents",
            "Communication on Lanes",
            "Equipment Care",
            "Tournament Etiquette",
        ],
    },
    TopicCategory {
        name: "Strategy",
        topics: &[
            "Spare Strategy",
            "Strike Ball Selection",
            "Reading Lane Transition",
            "Match Play Tactics",
            "Baker Format Strategy",
            "Position Round Strategy",
        ],
    },
];
