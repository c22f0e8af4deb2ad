//! Reference resource fetching.
//!
//! Pulls a URL and reduces it to plain text suitable for a prompt:
//! HTML is stripped to its main content, PDFs go through `pdf_extract`,
//! plain text passes through. Everything is capped at `max_chars` characters.

use std::sync::OnceLock;
use std::time::Duration;

use regex::Regex;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, warn};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
const TRUNCATION_MARKER: &str = "...";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to fetch: {status}")]
    Status { status: u16 },

    #[error("Unsupported content type '{0}'. Only HTML, text and PDF are supported.")]
    UnsupportedContentType(String),

    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("Fetch task failed: {0}")]
    Task(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FetchedResource {
    pub url: String,
    /// `<title>` of an HTML page, when it has one.
    pub title: Option<String>,
    pub content: String,
}

#[derive(Clone)]
pub struct ResourceFetcher {
    client: Client,
    max_chars: usize,
}

impl ResourceFetcher {
    pub fn new(timeout: Duration, max_chars: usize) -> Result<Self, FetchError> {
        Ok(Self {
            client: Client::builder()
                .timeout(timeout)
                .user_agent(USER_AGENT)
                .build()?,
            max_chars,
        })
    }

    pub async fn fetch(&self, url: &str) -> Result<FetchedResource, FetchError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_lowercase();

        let (title, text) = if content_type.contains("text/html") {
            let html = response.text().await?;
            (extract_title(&html), extract_text_from_html(&html))
        } else if content_type.contains("text/plain") {
            (None, response.text().await?)
        } else if content_type.contains("application/pdf") || url.to_lowercase().ends_with(".pdf") {
            let bytes = response.bytes().await?;
            let text = pdf_extract::extract_text_from_mem(&bytes)
                .map_err(|e| FetchError::Pdf(e.to_string()))?;
            (None, collapse_whitespace(&text))
        } else {
            return Err(FetchError::UnsupportedContentType(content_type));
        };

        debug!("Fetched {url}: {} chars", text.chars().count());

        Ok(FetchedResource {
            url: url.to_string(),
            title,
            content: truncate_chars(text.trim(), self.max_chars),
        })
    }

    /// Fetches every url concurrently. Results keep the input order; failures are
    /// logged and returned in place so callers can skip them.
    pub async fn fetch_all(&self, urls: &[String]) -> Vec<Result<FetchedResource, FetchError>> {
        let handles: Vec<_> = urls
            .iter()
            .cloned()
            .map(|url| {
                let fetcher = self.clone();
                tokio::spawn(async move { fetcher.fetch(&url).await })
            })
            .collect();

        let mut results = Vec::with_capacity(handles.len());
        for (url, handle) in urls.iter().zip(handles) {
            let result = handle
                .await
                .unwrap_or_else(|e| Err(FetchError::Task(e.to_string())));
            if let Err(e) = &result {
                warn!("Could not fetch resource {url}: {e}");
            }
            results.push(result);
        }
        results
    }
}

// ────────────────────────────────────────────────────────────────────────────
// HTML → text
// ────────────────────────────────────────────────────────────────────────────

fn title_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title>").expect("valid title regex"))
}

/// Elements whose text never belongs in the extracted content.
fn noise_res() -> &'static [Regex] {
    static RES: OnceLock<Vec<Regex>> = OnceLock::new();
    RES.get_or_init(|| {
        ["script", "style", "nav", "footer", "header", "head"]
            .iter()
            .map(|tag| {
                Regex::new(&format!(r"(?is)<{tag}\b[^>]*>.*?</{tag}\s*>")).expect("valid noise regex")
            })
            .collect()
    })
}

fn main_content_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?is)<(?:main|article)\b[^>]*>(.*?)</(?:main|article)\s*>").expect("valid main regex")
    })
}

fn body_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)<body\b[^>]*>(.*)</body\s*>").expect("valid body regex"))
}

fn tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<[^>]*>").expect("valid tag regex"))
}

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("valid whitespace regex"))
}

pub fn extract_title(html: &str) -> Option<String> {
    title_re()
        .captures(html)
        .map(|c| collapse_whitespace(&decode_entities(&c[1])))
        .filter(|t| !t.is_empty())
}

/// Drops noise elements, prefers `<main>`/`<article>` over `<body>`, strips tags
/// and collapses whitespace.
pub fn extract_text_from_html(html: &str) -> String {
    let mut cleaned = html.to_string();
    for re in noise_res() {
        cleaned = re.replace_all(&cleaned, " ").into_owned();
    }

    let region = main_content_re()
        .captures(&cleaned)
        .or_else(|| body_re().captures(&cleaned))
        .map(|c| c[1].to_string())
        .unwrap_or(cleaned);

    let text = tag_re().replace_all(&region, " ");
    collapse_whitespace(&decode_entities(&text))
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

fn collapse_whitespace(text: &str) -> String {
    whitespace_re().replace_all(text, " ").trim().to_string()
}

/// Keeps the first `max_chars` characters and appends `...` when anything was cut.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}{TRUNCATION_MARKER}", &text[..byte_idx]),
        None => text.to_string(),
    }
}
