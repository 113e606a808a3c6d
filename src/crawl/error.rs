//! Errors raised while discovering chapters (index fetch and TOC parsing).

use thiserror::Error;

/// Failure while fetching or parsing the manual's index page.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Failed to create HTTP client: {source}")]
    Client { source: reqwest::Error },

    #[error("Network error: could not reach {url}: {source}")]
    Network { url: String, source: reqwest::Error },

    #[error("HTTP {status} when fetching: {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Failed to read response body from {url}: {source}")]
    BodyRead { url: String, source: reqwest::Error },

    #[error("Invalid selector {selector:?}: {reason}")]
    Selector { selector: String, reason: String },

    #[error("Could not find table of contents: no div with class '{class}' on the index page.")]
    MissingContainer { class: String },
}
