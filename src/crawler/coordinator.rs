//! Job coordinator - end-to-end orchestration of one scrape job
//!
//! A job runs these steps in order, sequentially:
//! 1. Validate the job description (the only fatal check)
//! 2. Clamp its bounds to the configured hard limits
//! 3. Resolve the college to a first listing page
//! 4. Walk the listing's pages, extracting stubs
//! 5. Enrich each stub once, when requested
//!
//! Per-page and per-record failures are counted in the [`JobResult`], never
//! raised.

use crate::config::{validate_job, validate_settings, JobConfig, Settings};
use crate::crawler::enrichment::Enricher;
use crate::crawler::extractor::Extractor;
use crate::crawler::paginator::Paginator;
use crate::crawler::resolver::{Resolution, TargetResolver};
use crate::crawler::rules::SiteRegistry;
use crate::crawler::session::CrawlSession;
use crate::model::{EnrichmentStatus, FacultyRecord, JobResult, JobStatus};
use crate::LeadError;
use chrono::Utc;

/// Runs scrape jobs against one set of settings
///
/// Jobs share nothing but the settings: each run builds its own HTTP client,
/// limiter and state, all dropped when the run returns.
pub struct Coordinator {
    settings: Settings,
    registry: SiteRegistry,
}

impl Coordinator {
    /// Creates a coordinator, validating the settings and compiling site rules
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run jobs
    /// * `Err(LeadError)` - Settings are invalid
    pub fn new(settings: Settings) -> Result<Self, LeadError> {
        validate_settings(&settings)?;
        let registry = SiteRegistry::from_settings(&settings)?;

        tracing::debug!(
            "Coordinator ready: {} registry college(s), {} site rule(s)",
            settings.colleges.len(),
            registry.len()
        );

        Ok(Self { settings, registry })
    }

    /// Runs one job to completion
    ///
    /// Only an invalid job description (or a client that cannot be built)
    /// returns `Err`. An unknown college yields `Ok` with status
    /// `target_unresolved`.
    pub async fn run(&self, job: JobConfig) -> Result<JobResult, LeadError> {
        validate_job(&job)?;

        let requested = job;
        let job = requested.clamped(&self.settings.limits);
        if job != requested {
            tracing::info!(
                "Job bounds clamped: pages {} -> {}, per page {} -> {}, timeout {}s -> {}s, delay {}s -> {}s",
                requested.max_faculty_pages,
                job.max_faculty_pages,
                requested.max_faculty_per_page,
                job.max_faculty_per_page,
                requested.request_timeout_s,
                job.request_timeout_s,
                requested.polite_delay_s,
                job.polite_delay_s
            );
        }

        tracing::info!(
            "Starting job for '{}' (pages <= {}, per page <= {}, linkedin: {})",
            job.college_name,
            job.max_faculty_pages,
            job.max_faculty_per_page,
            job.include_linkedin
        );

        let mut result = JobResult::empty(job.clone(), Utc::now());
        result.college_name = requested.college_name;

        let mut session = CrawlSession::new(&self.settings.user_agent, &job)?;
        let resolver = TargetResolver::new(&self.settings)?;

        let target = match resolver.resolve(&mut session, &job.college_name).await? {
            Resolution::Resolved(target) => target,
            Resolution::Unresolved { website, contacts } => {
                tracing::warn!("Could not resolve a listing page for '{}'", job.college_name);
                result.status = JobStatus::TargetUnresolved;
                result.college_website = website.map(String::from);
                result.college_contacts = contacts;
                result.finished_at = Utc::now();
                return Ok(result);
            }
        };

        result.start_url = Some(target.listing_url.to_string());
        result.college_website = target.website.as_ref().map(|url| url.to_string());
        result.college_contacts = target.contacts.clone();

        let strategy = target
            .strategy
            .clone()
            .unwrap_or_else(|| self.registry.strategy_for(&target.listing_url));
        tracing::info!(
            "Crawling {} with the {} strategy",
            target.listing_url,
            strategy.name()
        );

        let outcome = Paginator::for_job(Extractor::new(strategy), &job)
            .run(&mut session, target.listing_url.clone())
            .await;

        result.pages_visited = outcome.pages_visited;
        result.pages_failed = outcome.pages_failed;
        result.entries_dropped = outcome.entries_dropped;
        result.termination = Some(outcome.termination);

        result.records = if job.include_linkedin {
            let enricher = Enricher::new(
                resolver.search_endpoint().clone(),
                target.display_name.as_str(),
                self.settings.search.max_candidates,
            );

            let mut records = Vec::with_capacity(outcome.stubs.len());
            for stub in outcome.stubs {
                let record = enricher.enrich(&mut session, stub).await;
                if record.enrichment_status == EnrichmentStatus::Failed {
                    result.enrichment_failures += 1;
                }
                records.push(record);
            }
            records
        } else {
            outcome
                .stubs
                .into_iter()
                .map(FacultyRecord::not_attempted)
                .collect()
        };

        result.finished_at = Utc::now();

        tracing::info!(
            "Job for '{}' finished: {} record(s), {} page(s) visited, {} failed, {} enrichment failure(s), {} request(s)",
            job.college_name,
            result.records.len(),
            result.pages_visited,
            result.pages_failed,
            result.enrichment_failures,
            session.requests()
        );

        Ok(result)
    }
}
