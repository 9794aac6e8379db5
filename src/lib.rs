//! College Leads: a bounded faculty-listing scraper
//!
//! This crate crawls a college's public faculty listing pages, extracts faculty
//! contact records, and optionally enriches them with professional-network profile
//! links. Every job runs under caller-supplied bounds: page count, entries per page,
//! politeness delay, and per-request timeout.

pub mod config;
pub mod crawler;
pub mod model;
pub mod output;
pub mod url;

use serde::Serialize;
use thiserror::Error;

/// Main error type for College Leads operations
///
/// Per-page and per-record failures never surface here; they are folded into
/// the counters of a [`model::JobResult`].
#[derive(Debug, Error)]
pub enum LeadError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to parse job description: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid domain pattern: {0}")]
    InvalidPattern(String),

    #[error("Invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },
}

/// Failure of a single outbound request
///
/// Local to one listing page or one enrichment lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed")]
    Connection,

    #[error("unexpected HTTP status {0}")]
    HttpStatus(u16),

    #[error("request failed: {0}")]
    Other(String),
}

impl FetchError {
    /// Cause category as reported to callers: `timeout`, `connection`,
    /// `http_status:<code>` or `other`
    pub fn category(&self) -> String {
        match self {
            Self::Timeout => "timeout".to_string(),
            Self::Connection => "connection".to_string(),
            Self::HttpStatus(code) => format!("http_status:{}", code),
            Self::Other(_) => "other".to_string(),
        }
    }
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,
}

/// Result type alias for College Leads operations
pub type Result<T> = std::result::Result<T, LeadError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

/// Liveness payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Health {
    pub ok: bool,
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Liveness probe
///
/// Returns a fixed healthy signal without touching the crawl engine.
pub fn health() -> Health {
    Health {
        ok: true,
        status: "healthy",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    }
}

// Re-export commonly used types
pub use config::{JobConfig, Settings};
pub use crawler::{run_job, Coordinator};
pub use model::{EnrichmentStatus, FacultyRecord, FacultyStub, JobResult, JobStatus};
