// Prompt fragments for post generation.
// The composer stitches these together; catalogs map enum tags to the blocks below.

/// Guidelines used with a catalog persona. Replace `{persona_name}`, `{tone}`, `{style}`.
pub const PERSONA_GUIDELINES_TEMPLATE: &str = "\
Guidelines for your posts as a {persona_name}:
- Write in the {tone}
- {style}
- Use emojis appropriately for this persona (5-10 emojis per post)
- Include practical, actionable tips that actually help
- Keep posts between 150-250 words for optimal engagement
- End with an engaging call-to-action or question that gets people commenting
- Use hashtags strategically (3-5 relevant ones at the end)
- Make it shareable - something bowlers would actually want to post
- Break up text with line breaks for mobile readability";

/// Guidelines used with the default coaching voice.
pub const DEFAULT_GUIDELINES: &str = "\
Guidelines for your posts:
- Write in a modern, relatable tone - be authentic and conversational
- Use emojis to make posts visually engaging and fun (5-10 emojis per post)
- Keep it real and hype - celebrate wins, normalize struggles
- Include practical, actionable tips that actually help
- Be encouraging but not cringe - avoid being too \"fellow kids\"
- Reference USBC coaching principles but make them relatable
- Keep posts between 150-250 words for optimal engagement
- End with an engaging call-to-action or question that gets people commenting
- Use hashtags strategically (3-5 relevant ones at the end)
- Make it shareable - something bowlers would actually want to post
- Break up text with line breaks for mobile readability";

// ────────────────────────────────────────────────────────────────────────────
// Platform formatting blocks
// ────────────────────────────────────────────────────────────────────────────

pub const FACEBOOK_RULES: &str = "\
PLATFORM FORMAT: Facebook
- Put the hook in the first 120-140 characters; only that much shows before \"See More\"
- 150-250 words total, short paragraphs separated by blank lines
- 3-5 hashtags at the very end
- Moderate emoji use (5-10), never more than two in a row
- Close with a question that invites comments";

pub const INSTAGRAM_RULES: &str = "\
PLATFORM FORMAT: Instagram caption
- The first 125 characters must stand alone as the hook; the rest hides behind \"more\"
- 100-200 words, one idea per line, generous line breaks
- 8-15 hashtags in a block after the caption
- Emoji-forward: lead lines with an emoji where it fits
- End with a call-to-action pointing at the image or a save/share";

pub const TWITTER_RULES: &str = "\
PLATFORM FORMAT: Twitter/X
- Each tweet is at most 280 characters; if the post needs more, write it as a thread
- Open with a punchy one-line hook, no preamble
- Separate thread tweets with blank lines so they can be split cleanly
- 1-2 hashtags maximum, only in the last tweet
- 1-3 emojis per tweet at most";

pub const REDDIT_RULES: &str = "\
PLATFORM FORMAT: Reddit
- Start with a short, descriptive title line (no clickbait, no emojis)
- Conversational, community tone; write like a fellow bowler, not a brand
- Use markdown: short paragraphs, bullet lists for steps or drills
- No hashtags, minimal or no emojis
- End by asking the community for their own experience or tips";

// ────────────────────────────────────────────────────────────────────────────
// Regeneration blocks, replace `{previous_content}`
// ────────────────────────────────────────────────────────────────────────────

pub const REGENERATE_SHORTER: &str = "\
REGENERATE INSTRUCTION: Take this previous post and make it SHORTER (100-150 words instead of 150-250). Keep the key message but be more concise.

Previous post:
{previous_content}";

pub const REGENERATE_NICER: &str = "\
REGENERATE INSTRUCTION: Take this previous post and make it NICER and more encouraging. Add more warmth, positivity, and supportive language.

Previous post:
{previous_content}";

pub const REGENERATE_HIPPER: &str = "\
REGENERATE INSTRUCTION: Take this previous post and make it HIPPER and more trendy. Add more slang, be more casual, increase the energy and hype.

Previous post:
{previous_content}";

pub const REGENERATE_CHANGE_PERSONALITY: &str = "\
REGENERATE INSTRUCTION: Rewrite this previous post in your own distinct voice and personality. Keep the core message but express it in your unique style.

Previous post:
{previous_content}";

pub const REGENERATE_FACEBOOK: &str = "\
REGENERATE INSTRUCTION: Rewrite this previous post for Facebook. Move the strongest hook into the first 140 characters, keep 150-250 words, and finish with 3-5 hashtags and a comment-driving question.

Previous post:
{previous_content}";

pub const REGENERATE_INSTAGRAM: &str = "\
REGENERATE INSTRUCTION: Rewrite this previous post as an Instagram caption. The first 125 characters must hook on their own; use short emoji-led lines and a hashtag block at the end.

Previous post:
{previous_content}";

pub const REGENERATE_TWITTER: &str = "\
REGENERATE INSTRUCTION: Rewrite this previous post for Twitter/X. Keep each tweet under 280 characters, split into a short thread if needed, and use at most 2 hashtags.

Previous post:
{previous_content}";

pub const REGENERATE_REDDIT: &str = "\
REGENERATE INSTRUCTION: Rewrite this previous post for Reddit. Add a plain descriptive title line, drop hashtags and most emojis, and use markdown lists where they help.

Previous post:
{previous_content}";

/// Final instruction. Replace `{post_noun}` and `{audience}`.
pub const CLOSING_TEMPLATE: &str = "\
Generate one {post_noun} following these guidelines. Make it engaging, authentic, and something {audience} would actually want to read and share!";
