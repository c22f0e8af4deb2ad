// Platform Reformatter: restructures generated text for a social platform's display
// conventions (preview folds, threads). Pure text transforms, no LLM calls.

pub mod breakpoint;
pub mod formatter;
pub mod handlers;
pub mod platform;
pub mod thread;

pub use formatter::{FormattedPost, FormatterRules, PlatformFormatter};
pub use platform::Platform;
