//! Per-job request session
//!
//! Every outbound request of a job goes through [`CrawlSession::get`], which
//! applies the politeness limiter and the per-request deadline.

use crate::config::{JobConfig, UserAgentConfig};
use crate::crawler::fetcher::{build_http_client, fetch, RawPage};
use crate::crawler::limiter::PoliteLimiter;
use crate::{FetchError, LeadError};
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Deadline used if the job carries an unusable timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP access for a single job
pub struct CrawlSession {
    client: Client,
    timeout: Duration,
    limiter: PoliteLimiter,
    requests: usize,
}

impl CrawlSession {
    /// Creates a session with a fresh client for the given job bounds
    pub fn new(user_agent: &UserAgentConfig, job: &JobConfig) -> Result<Self, LeadError> {
        let client = build_http_client(user_agent).map_err(LeadError::HttpClient)?;
        Ok(Self::with_client(client, job))
    }

    /// Creates a session around an existing client
    pub fn with_client(client: Client, job: &JobConfig) -> Self {
        Self {
            client,
            timeout: Duration::try_from_secs_f64(job.request_timeout_s)
                .unwrap_or(DEFAULT_TIMEOUT),
            limiter: PoliteLimiter::from_secs_f64(job.polite_delay_s),
            requests: 0,
        }
    }

    /// Waits for the politeness slot, then fetches the URL
    pub async fn get(&mut self, url: &Url) -> Result<RawPage, FetchError> {
        self.limiter.wait().await;
        self.requests += 1;
        tracing::debug!("GET {}", url);

        let result = fetch(&self.client, url, self.timeout).await;
        if let Err(e) = &result {
            tracing::debug!("GET {} failed: {}", url, e);
        }
        result
    }

    /// Outbound requests issued so far
    pub fn requests(&self) -> usize {
        self.requests
    }
}
