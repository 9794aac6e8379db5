//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for a job, including:
//! - Building HTTP clients with proper user agent strings
//! - GET requests under a per-request deadline
//! - Error classification into [`FetchError`] categories
//!
//! A failed request is never retried. Callers fold the failure into the
//! counters of the page or record it belonged to.

use crate::config::UserAgentConfig;
use crate::FetchError;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use url::Url;

/// Maximum redirect hops followed for a single request
const MAX_REDIRECTS: usize = 10;

/// A successfully fetched page
#[derive(Debug, Clone)]
pub struct RawPage {
    /// Final URL after redirects; relative links resolve against it
    pub url: Url,

    /// HTTP status code
    pub status: u16,

    /// Content-Type header value, empty when absent
    pub content_type: String,

    /// Page body content
    pub body: String,
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use college_leads::config::UserAgentConfig;
/// use college_leads::crawler::build_http_client;
///
/// let config = UserAgentConfig {
///     crawler_name: "CollegeLeads".to_string(),
///     crawler_version: "0.1".to_string(),
///     contact_url: Some("https://example.com/about".to_string()),
///     contact_email: None,
/// };
///
/// let client = build_http_client(&config).unwrap();
/// ```
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.header_value())
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL under the given deadline
///
/// # Error Classification
///
/// | Condition | Result |
/// |-----------|--------|
/// | Deadline exceeded (headers or body) | `Timeout` |
/// | Connection refused, DNS, TLS | `Connection` |
/// | Non-2xx status after redirects | `HttpStatus(code)` |
/// | Anything else (redirect loop, bad body) | `Other` |
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
/// * `timeout` - Deadline covering the whole request, body included
pub async fn fetch(client: &Client, url: &Url, timeout: Duration) -> Result<RawPage, FetchError> {
    let response = client
        .get(url.clone())
        .timeout(timeout)
        .send()
        .await
        .map_err(classify_error)?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::HttpStatus(status.as_u16()));
    }

    let final_url = response.url().clone();
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    let body = response.text().await.map_err(classify_error)?;

    Ok(RawPage {
        url: final_url,
        status: status.as_u16(),
        content_type,
        body,
    })
}

/// Maps a transport error to its reported category
fn classify_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout
    } else if e.is_connect() {
        FetchError::Connection
    } else if let Some(status) = e.status() {
        FetchError::HttpStatus(status.as_u16())
    } else {
        FetchError::Other(e.to_string())
    }
}
