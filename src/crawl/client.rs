//! Blocking HTTP client for the index page: fixed browser-like User-Agent, optional timeout.

use super::error::CrawlError;
use std::time::Duration;

/// Browser-like User-Agent sent with the index request. Some documentation hosts
/// refuse the default reqwest agent.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 6.1; WOW64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/63.0.3239.132 Safari/537.36 QIHU 360SE";
const MAX_REDIRECTS: usize = 10;

/// Blocking client used to fetch the table of contents.
#[derive(Debug)]
pub struct PageClient {
    inner: reqwest::blocking::Client,
}

impl PageClient {
    /// Build a client with the default User-Agent and no timeout.
    pub fn new() -> Result<Self, CrawlError> {
        Self::builder().build()
    }

    pub fn builder() -> PageClientBuilder {
        PageClientBuilder::default()
    }

    /// GET `url` and return the body as text. Non-success statuses are errors.
    pub fn fetch_page(&self, url: &str) -> Result<String, CrawlError> {
        let response = self
            .inner
            .get(url)
            .send()
            .map_err(|e| CrawlError::Network {
                url: url.to_string(),
                source: e,
            })?;
        check_response(response, url)
    }
}

/// Check response status and read body as text.
fn check_response(response: reqwest::blocking::Response, url: &str) -> Result<String, CrawlError> {
    let status = response.status();
    if !status.is_success() {
        return Err(CrawlError::HttpStatus {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }
    response.text().map_err(|e| CrawlError::BodyRead {
        url: url.to_string(),
        source: e,
    })
}

/// Builder for [PageClient] with optional User-Agent and timeout.
#[derive(Debug, Default)]
pub struct PageClientBuilder {
    user_agent: Option<String>,
    timeout_secs: Option<u64>,
}

impl PageClientBuilder {
    /// Set a custom User-Agent. If not set, [DEFAULT_USER_AGENT] is used.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Set request timeout in seconds. Without it a request may block indefinitely.
    pub fn timeout_secs(mut self, secs: Option<u64>) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn build(self) -> Result<PageClient, CrawlError> {
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());
        // The blocking client defaults to a 30s timeout; None disables it.
        let inner = reqwest::blocking::Client::builder()
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .timeout(self.timeout_secs.map(Duration::from_secs))
            .build()
            .map_err(|e| CrawlError::Client { source: e })?;
        Ok(PageClient { inner })
    }
}
