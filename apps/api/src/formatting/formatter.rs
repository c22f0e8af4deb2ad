//! Platform Reformatter: restructures already-generated text for a target platform.
//!
//! No generation happens here. Each platform is bound to a `FormatRule` record in
//! `FormatterRules`; platforms without a record are passed through unchanged.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::formatting::breakpoint::find_natural_breakpoint;
use crate::formatting::platform::Platform;
use crate::formatting::thread::split_into_segments;

// ────────────────────────────────────────────────────────────────────────────
// Output types
// ────────────────────────────────────────────────────────────────────────────

/// Metrics describing how content displays on a platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformMetrics {
    /// Characters in the rendered content (thread numbering and separators included).
    pub character_count: usize,
    /// Whitespace-separated words in the original content. Blank content counts 0.
    pub word_count: usize,
    /// Characters visible before the platform folds the post.
    pub preview_length: usize,
    pub is_truncated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_count: Option<usize>,
    /// Thread segments discarded by the segment cap. Non-zero means content was lost.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dropped_segments: Option<usize>,
}

/// Content restructured for one platform, with its metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedPost {
    pub content: String,
    pub metrics: PlatformMetrics,
    pub platform: Platform,
}

// ────────────────────────────────────────────────────────────────────────────
// Rules
// ────────────────────────────────────────────────────────────────────────────

/// How one platform restructures content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FormatRule {
    Passthrough,
    /// Feed with a "show more" fold. Content longer than `threshold` gets a preview
    /// boundary searched for in `[min, max]`.
    Preview {
        threshold: usize,
        min: usize,
        max: usize,
    },
    /// Microblog thread. Segments hold at most `limit - reserved` characters;
    /// `reserved` leaves room for the "n/total " prefix.
    Thread {
        limit: usize,
        reserved: usize,
        max_segments: usize,
        separator: String,
    },
}

/// Platform → rule table, owned by the formatter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatterRules {
    rules: BTreeMap<Platform, FormatRule>,
}

impl FormatterRules {
    pub fn new() -> Self {
        Self {
            rules: BTreeMap::new(),
        }
    }

    pub fn with_rule(mut self, platform: Platform, rule: FormatRule) -> Self {
        self.rules.insert(platform, rule);
        self
    }

    pub fn rule_for(&self, platform: Platform) -> Option<&FormatRule> {
        self.rules.get(&platform)
    }
}

impl Default for FormatterRules {
    /// Facebook folds at ~140 chars, Instagram at ~125, Twitter threads at 280.
    fn default() -> Self {
        FormatterRules::new()
            .with_rule(
                Platform::Facebook,
                FormatRule::Preview {
                    threshold: 140,
                    min: 120,
                    max: 140,
                },
            )
            .with_rule(
                Platform::Instagram,
                FormatRule::Preview {
                    threshold: 125,
                    min: 115,
                    max: 125,
                },
            )
            .with_rule(
                Platform::Twitter,
                FormatRule::Thread {
                    limit: 280,
                    reserved: 10,
                    max_segments: 8,
                    separator: "\n\n---\n\n".to_string(),
                },
            )
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Formatter
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct PlatformFormatter {
    rules: FormatterRules,
}

impl PlatformFormatter {
    pub fn new(rules: FormatterRules) -> Self {
        Self { rules }
    }

    /// Restructures `content` for `platform`. Total and idempotent; never fails.
    pub fn format(&self, content: &str, platform: Platform) -> FormattedPost {
        let chars: Vec<char> = content.chars().collect();
        let word_count = count_words(content);
        let rule = self.rules.rule_for(platform);

        // Blank content has nothing to fold or thread.
        if word_count == 0 {
            let mut post = passthrough(content, chars.len(), word_count, platform);
            if matches!(rule, Some(FormatRule::Thread { .. })) {
                post.metrics.thread_count = Some(0);
            }
            return post;
        }

        match rule {
            None | Some(FormatRule::Passthrough) => {
                debug!("No format rule for {platform}, passing content through");
                passthrough(content, chars.len(), word_count, platform)
            }
            Some(FormatRule::Preview {
                threshold,
                min,
                max,
            }) => format_preview(content, &chars, word_count, platform, *threshold, *min, *max),
            Some(FormatRule::Thread {
                limit,
                reserved,
                max_segments,
                separator,
            }) => format_thread(
                content,
                chars.len(),
                word_count,
                platform,
                *limit,
                limit.saturating_sub(*reserved),
                *max_segments,
                separator,
            ),
        }
    }
}

/// Word-count convention: whitespace-separated tokens, so blank content is 0 words.
pub fn count_words(content: &str) -> usize {
    content.split_whitespace().count()
}

fn passthrough(
    content: &str,
    character_count: usize,
    word_count: usize,
    platform: Platform,
) -> FormattedPost {
    FormattedPost {
        content: content.to_string(),
        metrics: PlatformMetrics {
            character_count,
            word_count,
            preview_length: character_count,
            is_truncated: false,
            thread_count: None,
            dropped_segments: None,
        },
        platform,
    }
}

fn format_preview(
    content: &str,
    chars: &[char],
    word_count: usize,
    platform: Platform,
    threshold: usize,
    min: usize,
    max: usize,
) -> FormattedPost {
    let character_count = chars.len();
    if character_count <= threshold {
        return passthrough(content, character_count, word_count, platform);
    }

    let preview_length = find_natural_breakpoint(chars, min, max);

    FormattedPost {
        content: content.to_string(),
        metrics: PlatformMetrics {
            character_count,
            word_count,
            preview_length,
            is_truncated: true,
            thread_count: None,
            dropped_segments: None,
        },
        platform,
    }
}

#[allow(clippy::too_many_arguments)]
fn format_thread(
    content: &str,
    character_count: usize,
    word_count: usize,
    platform: Platform,
    limit: usize,
    segment_limit: usize,
    max_segments: usize,
    separator: &str,
) -> FormattedPost {
    if character_count <= limit {
        let mut post = passthrough(content, character_count, word_count, platform);
        post.metrics.thread_count = Some(1);
        return post;
    }

    let split = split_into_segments(content, segment_limit, max_segments);
    if split.dropped > 0 {
        warn!(
            "Thread for {platform} capped at {max_segments} segments; {} segment(s) dropped",
            split.dropped
        );
    }

    let total = split.segments.len();
    let rendered = split
        .segments
        .iter()
        .enumerate()
        .map(|(i, segment)| format!("{}/{} {}", i + 1, total, segment))
        .collect::<Vec<_>>()
        .join(separator);

    let preview_length = split
        .segments
        .first()
        .map(|s| s.chars().count())
        .unwrap_or(0);

    FormattedPost {
        metrics: PlatformMetrics {
            character_count: rendered.chars().count(),
            word_count,
            preview_length,
            is_truncated: true,
            thread_count: Some(total),
            dropped_segments: Some(split.dropped),
        },
        content: rendered,
        platform,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Space-separated filler words, exactly `len` characters, no punctuation.
    fn filler(len: usize) -> String {
        let mut s = "bowling ".repeat(len / 8 + 1);
        s.truncate(len);
        s
    }

    fn formatter() -> PlatformFormatter {
        PlatformFormatter::new(FormatterRules::default())
    }

    #[test]
    fn test_standard_is_passthrough() {
        let text = filler(500);
        let post = formatter().format(&text, Platform::Standard);
        assert_eq!(post.content, text);
        assert!(!post.metrics.is_truncated);
        assert_eq!(post.metrics.preview_length, 500);
        assert_eq!(post.metrics.character_count, 500);
    }

    #[test]
    fn test_platform_without_rule_is_passthrough() {
        let text = filler(400);
        let post = formatter().format(&text, Platform::Reddit);
        assert_eq!(post.content, text);
        assert!(!post.metrics.is_truncated);
        assert_eq!(post.platform, Platform::Reddit);
    }

    #[test]
    fn test_facebook_short_content_not_truncated() {
        let text = filler(140);
        let post = formatter().format(&text, Platform::Facebook);
        assert!(!post.metrics.is_truncated);
        assert_eq!(post.metrics.preview_length, 140);
    }

    #[test]
    fn test_facebook_sentence_boundary_at_130() {
        // 128 chars + ". " → boundary at 130, total 200
        let text = format!("{}. {}", "x".repeat(128), "y".repeat(70));
        assert_eq!(text.chars().count(), 200);
        let post = formatter().format(&text, Platform::Facebook);
        assert!(post.metrics.is_truncated);
        assert_eq!(post.metrics.preview_length, 130);
        assert_eq!(post.content, text, "preview platforms never rewrite content");
    }

    #[test]
    fn test_facebook_without_punctuation_cuts_at_word_boundary() {
        let text = filler(200);
        let post = formatter().format(&text, Platform::Facebook);
        let cut = post.metrics.preview_length;
        let chars: Vec<char> = text.chars().collect();

        assert!(post.metrics.is_truncated);
        assert!((120..=140).contains(&cut));
        assert!(matches!(chars[cut], ' ' | ',' | '\n'));
        // the visible preview ends on a whole word
        assert!(chars[..cut].iter().collect::<String>().ends_with("bowling"));
    }

    #[test]
    fn test_instagram_uses_its_own_window() {
        let text = filler(300);
        let post = formatter().format(&text, Platform::Instagram);
        assert!(post.metrics.is_truncated);
        assert!((115..=125).contains(&post.metrics.preview_length));

        let short = filler(125);
        let post = formatter().format(&short, Platform::Instagram);
        assert!(!post.metrics.is_truncated);
    }

    #[test]
    fn test_twitter_single_tweet() {
        let text = filler(280);
        let post = formatter().format(&text, Platform::Twitter);
        assert_eq!(post.content, text);
        assert_eq!(post.metrics.thread_count, Some(1));
        assert!(!post.metrics.is_truncated);
    }

    #[test]
    fn test_twitter_thread_from_paragraphs() {
        let paragraphs: Vec<String> = (0..3).map(|_| filler(195)).collect();
        let text = paragraphs.join("\n\n");
        assert!(text.chars().count() > 580);

        let post = formatter().format(&text, Platform::Twitter);
        let parts: Vec<&str> = post.content.split("\n\n---\n\n").collect();

        assert_eq!(post.metrics.thread_count, Some(3));
        assert_eq!(parts.len(), 3);
        assert!(post.metrics.is_truncated);
        assert_eq!(post.metrics.dropped_segments, Some(0));

        let mut body = String::new();
        for (i, part) in parts.iter().enumerate() {
            let prefix = format!("{}/3 ", i + 1);
            assert!(part.starts_with(&prefix), "segment {i} numbered");
            let segment = &part[prefix.len()..];
            assert!(segment.chars().count() <= 270);
            body.push_str(segment);
        }

        let squash = |s: &str| s.chars().filter(|c| !c.is_whitespace()).collect::<String>();
        assert_eq!(squash(&body), squash(&text));
        assert_eq!(post.metrics.character_count, post.content.chars().count());
    }

    #[test]
    fn test_twitter_thread_caps_at_eight_and_flags_loss() {
        let text = (0..10).map(|_| filler(260)).collect::<Vec<_>>().join("\n\n");
        let post = formatter().format(&text, Platform::Twitter);
        assert_eq!(post.metrics.thread_count, Some(8));
        assert_eq!(post.metrics.dropped_segments, Some(2));
        assert!(post.content.starts_with("1/8 "));
    }

    #[test]
    fn test_empty_content_has_zero_metrics_everywhere() {
        for platform in Platform::ALL {
            let post = formatter().format("", platform);
            assert_eq!(post.metrics.character_count, 0, "{platform}");
            assert_eq!(post.metrics.word_count, 0, "{platform}");
            assert_eq!(post.metrics.preview_length, 0, "{platform}");
            assert!(!post.metrics.is_truncated, "{platform}");
        }
    }

    #[test]
    fn test_blank_content_is_never_truncated_or_threaded() {
        let blank = " ".repeat(300);
        for platform in Platform::ALL {
            let post = formatter().format(&blank, platform);
            assert_eq!(post.content, blank, "{platform}");
            assert_eq!(post.metrics.word_count, 0, "{platform}");
            assert!(!post.metrics.is_truncated, "{platform}");
            assert_eq!(post.metrics.dropped_segments, None, "{platform}");
        }

        let tweet = formatter().format(&format!("{blank}\n\n\t"), Platform::Twitter);
        assert_eq!(tweet.metrics.thread_count, Some(0));
        assert!(!tweet.metrics.is_truncated);
    }

    #[test]
    fn test_format_is_idempotent_for_same_input() {
        let text = (0..4).map(|_| filler(200)).collect::<Vec<_>>().join("\n\n");
        let f = formatter();
        assert_eq!(
            f.format(&text, Platform::Twitter),
            f.format(&text, Platform::Twitter)
        );
    }

    #[test]
    fn test_fixture_rules_can_replace_defaults() {
        let rules = FormatterRules::new().with_rule(
            Platform::Reddit,
            FormatRule::Preview {
                threshold: 10,
                min: 5,
                max: 10,
            },
        );
        let f = PlatformFormatter::new(rules);
        let post = f.format("one two three four", Platform::Reddit);
        assert!(post.metrics.is_truncated);
        assert_eq!(post.metrics.preview_length, 7);
        // Facebook has no rule in this fixture
        assert!(!f.format(&filler(300), Platform::Facebook).metrics.is_truncated);
    }

    #[test]
    fn test_word_count_convention() {
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words("   \n "), 0);
        assert_eq!(count_words("strike spare  split\n"), 3);
    }
}
