//! Statistics derived from a job result
//!
//! This module provides the counters shown after a job finishes.

use crate::model::{EnrichmentStatus, FacultyRecord, JobResult};

/// Job statistics summary
#[derive(Debug, Clone, PartialEq)]
pub struct JobStatistics {
    pub records: usize,

    /// Records with at least one email address
    pub with_email: usize,

    /// Records with a profile link on the college site
    pub with_profile: usize,

    /// Records whose enrichment found a profile
    pub enriched: usize,

    pub pages_visited: usize,
    pub pages_failed: usize,
    pub entries_dropped: usize,
    pub enrichment_failures: usize,

    /// Wall time in seconds
    pub elapsed_secs: f64,
}

impl JobStatistics {
    pub fn from_result(result: &JobResult) -> Self {
        Self {
            records: result.records.len(),
            with_email: count_records(result, |r| r.stub.email.is_some()),
            with_profile: count_records(result, |r| r.stub.profile_url.is_some()),
            enriched: count_records(result, |r| {
                r.enrichment_status == EnrichmentStatus::Succeeded
            }),
            pages_visited: result.pages_visited,
            pages_failed: result.pages_failed,
            entries_dropped: result.entries_dropped,
            enrichment_failures: result.enrichment_failures,
            elapsed_secs: result.elapsed().num_milliseconds() as f64 / 1000.0,
        }
    }

    /// Share of records carrying an email, as a percentage
    pub fn email_rate(&self) -> f64 {
        if self.records > 0 {
            (self.with_email as f64 / self.records as f64) * 100.0
        } else {
            0.0
        }
    }
}

fn count_records(result: &JobResult, pred: impl Fn(&FacultyRecord) -> bool) -> usize {
    result.records.iter().filter(|r| pred(r)).count()
}

/// Prints job statistics to stderr in a formatted manner
///
/// Stdout is left to the rendered result.
///
/// # Arguments
///
/// * `result` - The finished job
pub fn print_summary(result: &JobResult) {
    let stats = JobStatistics::from_result(result);

    eprintln!("=== Job Statistics ===\n");

    eprintln!("College: {}", result.college_name);
    eprintln!("Status: {:?}", result.status);
    if let Some(start) = &result.start_url {
        eprintln!("Listing: {}", start);
    }
    if let Some(termination) = result.termination {
        eprintln!("Stopped: {}", termination);
    }
    eprintln!();

    eprintln!("Pages:");
    eprintln!("  Visited: {}", stats.pages_visited);
    eprintln!("  Failed: {}", stats.pages_failed);
    eprintln!("  Unnamed entries dropped: {}", stats.entries_dropped);
    eprintln!();

    eprintln!("Records: {}", stats.records);
    eprintln!(
        "  With email: {} ({:.1}%)",
        stats.with_email,
        stats.email_rate()
    );
    eprintln!("  With profile link: {}", stats.with_profile);
    if result.config.include_linkedin {
        eprintln!("  Enriched: {}", stats.enriched);
        eprintln!("  Enrichment failures: {}", stats.enrichment_failures);
    }
    eprintln!();

    eprintln!("Elapsed: {:.2}s", stats.elapsed_secs);
}
