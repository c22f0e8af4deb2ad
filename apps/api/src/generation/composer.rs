//! Prompt Composer: renders one instruction string from a `PromptRequest`.
//!
//! Pure: no I/O, no clock, no randomness. Section order is fixed:
//! voice preamble + guidelines, platform rules, reference block, post type/topic
//! (with optional context), regeneration block, closing line.
//! Unknown ids degrade to defaults; nothing here can fail.

use tracing::debug;

use crate::formatting::Platform;
use crate::generation::catalog::{PromptCatalog, ResolvedVoice};
use crate::generation::prompts::{CLOSING_TEMPLATE, DEFAULT_GUIDELINES, PERSONA_GUIDELINES_TEMPLATE};
use crate::generation::request::PromptRequest;

#[derive(Debug, Clone)]
pub struct PromptComposer {
    catalog: PromptCatalog,
}

impl PromptComposer {
    pub fn new(catalog: PromptCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &PromptCatalog {
        &self.catalog
    }

    pub fn compose(&self, request: &PromptRequest) -> String {
        let post_noun = post_noun(request.platform);
        let voice = self.catalog.resolve_voice(request.persona_id.as_deref());

        let mut sections: Vec<String> = vec![
            voice_preamble(voice, request, post_noun),
            voice_guidelines(voice),
        ];

        if let Some(rules) = self.catalog.platform_rules(request.platform) {
            sections.push(rules.to_string());
        }

        if let Some(reference) = non_blank(request.reference_text.as_deref()) {
            sections.push(reference.to_string());
        }

        sections.push(topic_section(request));

        if let Some((directive, prior)) = request.effective_regeneration() {
            match self.catalog.regeneration_template(directive) {
                Some(template) => sections.push(template.replace("{previous_content}", prior)),
                None => debug!(
                    "No regeneration template for '{}', omitting block",
                    directive.as_str()
                ),
            }
        } else if request.regeneration.is_some() {
            debug!("Regeneration directive without prior content ignored");
        }

        sections.push(
            CLOSING_TEMPLATE
                .replace("{post_noun}", post_noun)
                .replace("{audience}", &request.audience),
        );

        sections.join("\n\n")
    }
}

fn voice_preamble(voice: ResolvedVoice<'_>, request: &PromptRequest, post_noun: &str) -> String {
    match voice {
        ResolvedVoice::Persona(persona) => format!(
            "You are {coach}, a {name}.\n{tone}\n{style}\nYou specialize in: {specs}.\n\n\
             You are creating engaging {post_noun}s for {audience}.",
            coach = request.coach_name,
            name = persona.name,
            tone = persona.tone,
            style = persona.style,
            specs = persona.specializations.join(", "),
            audience = request.audience,
        ),
        ResolvedVoice::Default(default) => format!(
            "You are {coach}, {role}.\nYour personality is {tone}.\nYou specialize in: {expertise}.\n\n\
             You are creating engaging {post_noun}s for {audience}.",
            coach = request.coach_name,
            role = default.role,
            tone = default.tone,
            expertise = default.expertise.join(", "),
            audience = request.audience,
        ),
    }
}

fn voice_guidelines(voice: ResolvedVoice<'_>) -> String {
    match voice {
        ResolvedVoice::Persona(persona) => PERSONA_GUIDELINES_TEMPLATE
            .replace("{persona_name}", &persona.name)
            .replace("{tone}", &persona.tone)
            .replace("{style}", &persona.style),
        ResolvedVoice::Default(_) => DEFAULT_GUIDELINES.to_string(),
    }
}

fn topic_section(request: &PromptRequest) -> String {
    let mut section = format!(
        "Post Type: {}\nTopic: {}",
        request.post_type.label(),
        request.topic
    );
    if let Some(context) = non_blank(request.additional_context.as_deref()) {
        section.push_str("\n\nAdditional Context:\n");
        section.push_str(context);
    }
    section
}

fn post_noun(platform: Platform) -> &'static str {
    match platform {
        Platform::Standard => "social media post",
        Platform::Facebook => "Facebook post",
        Platform::Instagram => "Instagram caption",
        Platform::Twitter => "Twitter/X post",
        Platform::Reddit => "Reddit post",
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::generation::catalog::{DefaultVoice, PersonaCatalog, PersonaDescriptor};
    use crate::generation::request::{PostType, RegenerationDirective};

    fn composer() -> PromptComposer {
        PromptComposer::new(PromptCatalog::bowling())
    }

    fn request() -> PromptRequest {
        PromptRequest::new(PostType::TipOfTheDay, "Spare Shooting")
    }

    fn fixture_catalog() -> PromptCatalog {
        PromptCatalog {
            personas: PersonaCatalog::new(vec![PersonaDescriptor {
                id: "tester".to_string(),
                name: "Fixture Persona".to_string(),
                emoji: "🧪".to_string(),
                description: "test".to_string(),
                tone: "FIXTURE_TONE".to_string(),
                style: "FIXTURE_STYLE".to_string(),
                specializations: vec!["Testing".to_string()],
            }]),
            default_voice: DefaultVoice {
                role: "a fixture coach".to_string(),
                tone: "FIXTURE_DEFAULT_TONE".to_string(),
                expertise: vec!["Fixtures".to_string()],
            },
            platform_rules: BTreeMap::from([(Platform::Twitter, "FIXTURE_TWITTER".to_string())]),
            regeneration_templates: BTreeMap::from([(
                RegenerationDirective::Shorter,
                "FIXTURE_SHORTER <<{previous_content}>>".to_string(),
            )]),
        }
    }

    #[test]
    fn test_compose_is_deterministic() {
        let mut req = request();
        req.persona_id = Some("competitive-grinder".to_string());
        req.platform = Platform::Instagram;
        req.reference_text = Some("REFERENCE RESOURCE 1".to_string());
        let c = composer();
        assert_eq!(c.compose(&req), c.compose(&req));
    }

    #[test]
    fn test_basic_sections_present() {
        let prompt = composer().compose(&request());
        assert!(prompt.starts_with("You are Coach, an experienced High School Bowling Coach"));
        assert!(prompt.contains("Post Type: Tip of the Day\nTopic: Spare Shooting"));
        assert!(prompt.contains("high school bowlers"));
        assert!(!prompt.contains("PLATFORM FORMAT"));
        assert!(!prompt.contains("REGENERATE INSTRUCTION"));
        assert!(!prompt.contains("Additional Context"));
    }

    #[test]
    fn test_unknown_persona_uses_default_voice() {
        let mut req = request();
        req.persona_id = Some("does-not-exist".to_string());
        let prompt = composer().compose(&req);
        assert!(prompt.contains("Encouraging, knowledgeable, and supportive"));
        assert_eq!(prompt, composer().compose(&request()));
    }

    #[test]
    fn test_known_persona_sets_voice() {
        let mut req = request();
        req.persona_id = Some("usbc-gold-coach".to_string());
        req.coach_name = "Coach Dana".to_string();
        let prompt = composer().compose(&req);
        assert!(prompt.starts_with("You are Coach Dana, a USBC Gold Coach."));
        assert!(prompt.contains("Guidelines for your posts as a USBC Gold Coach"));
        assert!(prompt.contains("You specialize in: USBC coaching certification"));
    }

    #[test]
    fn test_regeneration_without_prior_content_is_omitted() {
        let mut req = request();
        req.regeneration = Some(RegenerationDirective::Shorter);
        let prompt = composer().compose(&req);
        assert!(!prompt.contains("REGENERATE INSTRUCTION"));
        assert_eq!(prompt, composer().compose(&request()));

        req.prior_content = Some("  \n ".to_string());
        assert!(!composer().compose(&req).contains("REGENERATE INSTRUCTION"));
    }

    #[test]
    fn test_regeneration_with_prior_content_embeds_it() {
        let mut req = request();
        req.regeneration = Some(RegenerationDirective::Nicer);
        req.prior_content = Some("Hit your mark!".to_string());
        let prompt = composer().compose(&req);
        assert!(prompt.contains("make it NICER"));
        assert!(prompt.contains("Previous post:\nHit your mark!"));
    }

    #[test]
    fn test_section_order() {
        let mut req = request();
        req.platform = Platform::Facebook;
        req.reference_text = Some("REFERENCE RESOURCE 1: USBC".to_string());
        req.additional_context = Some("Regionals are next week".to_string());
        req.regeneration = Some(RegenerationDirective::Twitter);
        req.prior_content = Some("old".to_string());
        let prompt = composer().compose(&req);

        let preamble = prompt.find("You are Coach").unwrap();
        let platform = prompt.find("PLATFORM FORMAT: Facebook").unwrap();
        let reference = prompt.find("REFERENCE RESOURCE 1").unwrap();
        let topic = prompt.find("Post Type:").unwrap();
        let context = prompt.find("Additional Context:\nRegionals").unwrap();
        let regen = prompt.find("REGENERATE INSTRUCTION: Rewrite this previous post for Twitter/X").unwrap();
        let closing = prompt.find("Generate one Facebook post").unwrap();

        assert!(preamble < platform);
        assert!(platform < reference);
        assert!(reference < topic);
        assert!(topic < context);
        assert!(context < regen);
        assert!(regen < closing);
    }

    #[test]
    fn test_standard_platform_has_no_rules_block() {
        let mut req = request();
        req.platform = Platform::Standard;
        assert!(!composer().compose(&req).contains("PLATFORM FORMAT"));
        req.platform = Platform::Reddit;
        assert!(composer().compose(&req).contains("PLATFORM FORMAT: Reddit"));
    }

    #[test]
    fn test_blank_reference_text_is_omitted() {
        let mut req = request();
        req.reference_text = Some("   ".to_string());
        assert_eq!(composer().compose(&req), composer().compose(&request()));
    }

    #[test]
    fn test_fixture_catalog_is_used_instead_of_builtin() {
        let c = PromptComposer::new(fixture_catalog());

        let mut req = request();
        req.persona_id = Some("tester".to_string());
        req.platform = Platform::Twitter;
        req.regeneration = Some(RegenerationDirective::Shorter);
        req.prior_content = Some("PRIOR".to_string());
        let prompt = c.compose(&req);
        assert!(prompt.contains("FIXTURE_TONE"));
        assert!(prompt.contains("FIXTURE_TWITTER"));
        assert!(prompt.contains("FIXTURE_SHORTER <<PRIOR>>"));

        // directive with no template in the fixture is dropped
        req.regeneration = Some(RegenerationDirective::Hipper);
        assert!(!c.compose(&req).contains("FIXTURE_SHORTER"));

        // platform with no block in the fixture is dropped
        req.platform = Platform::Facebook;
        assert!(!c.compose(&req).contains("FIXTURE_TWITTER"));

        req.persona_id = None;
        assert!(c.compose(&req).contains("FIXTURE_DEFAULT_TONE"));
    }
}
