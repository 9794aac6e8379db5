//! Crawler module for faculty listing jobs
//!
//! This module contains the crawl engine, including:
//! - HTTP fetching under a per-request deadline
//! - Politeness spacing shared by every request of a job
//! - Target resolution and website discovery
//! - Listing extraction and pagination
//! - Optional professional-network enrichment
//! - Overall job coordination

mod contacts;
mod coordinator;
mod enrichment;
mod extractor;
mod fetcher;
mod limiter;
mod paginator;
mod resolver;
mod rules;
mod session;

pub use contacts::{find_emails, find_phones};
pub use coordinator::Coordinator;
pub use enrichment::{parse_results, result_links, Enricher, ProfileHit};
pub use extractor::Extractor;
pub use fetcher::{build_http_client, fetch, RawPage};
pub use limiter::PoliteLimiter;
pub use paginator::{PaginationOutcome, Paginator};
pub use resolver::{find_college, Resolution, ResolvedTarget, TargetResolver};
pub use rules::{CompiledSelectors, ExtractionStrategy, SiteRegistry};
pub use session::CrawlSession;

use crate::config::{JobConfig, Settings};
use crate::model::JobResult;
use crate::LeadError;

/// Runs a complete scrape job
///
/// This is the main entry point for a single job. It will:
/// 1. Validate and clamp the job
/// 2. Resolve the college to a listing page
/// 3. Walk and extract the listing's pages
/// 4. Enrich records when requested
///
/// # Arguments
///
/// * `job` - The job description
/// * `settings` - Process-level settings
///
/// # Returns
///
/// * `Ok(JobResult)` - Job ran; partial failures are in its counters
/// * `Err(LeadError)` - Job or settings were invalid
pub async fn run_job(job: JobConfig, settings: Settings) -> Result<JobResult, LeadError> {
    Coordinator::new(settings)?.run(job).await
}
