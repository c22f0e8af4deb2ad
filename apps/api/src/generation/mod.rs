// Prompt Composer and the generation pipeline built on it.
// Catalog data and prompt fragments are static; the composer is pure; the
// generator is the only part that does I/O (resource fetch, LLM, library).

pub mod catalog;
pub mod composer;
pub mod generator;
pub mod handlers;
pub mod prompts;
pub mod request;

pub use catalog::PromptCatalog;
pub use composer::PromptComposer;
