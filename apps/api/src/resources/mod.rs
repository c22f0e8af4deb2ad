pub mod fetcher;
pub mod handlers;
pub mod prompt_block;

pub use fetcher::{FetchError, ResourceFetcher};
pub use prompt_block::{format_resources_for_prompt, ReferenceResource};
