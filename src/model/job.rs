//! Job-level result assembly

use crate::config::JobConfig;
use crate::model::{FacultyRecord, Termination};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Overall outcome of a job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// The target was resolved and crawled (possibly with partial failures)
    Completed,
    /// No crawlable listing page is known for the college
    TargetUnresolved,
}

/// Contact details found on the college homepage during discovery
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CollegeContacts {
    pub emails: Vec<String>,
    pub phones: Vec<String>,
}

/// Everything a job returns to its caller
#[derive(Debug, Clone, Serialize)]
pub struct JobResult {
    pub college_name: String,

    pub status: JobStatus,

    /// Records in discovery order
    pub records: Vec<FacultyRecord>,

    /// Listing page fetches attempted
    pub pages_visited: usize,

    /// Listing page fetches that failed
    pub pages_failed: usize,

    pub enrichment_failures: usize,

    /// Candidate entries discarded for lacking a name
    pub entries_dropped: usize,

    /// Why pagination stopped; absent when it never started
    pub termination: Option<Termination>,

    /// First listing page crawled
    pub start_url: Option<String>,

    pub college_website: Option<String>,

    pub college_contacts: CollegeContacts,

    /// Bounds the job actually ran with, after hard limits
    pub config: JobConfig,

    pub started_at: DateTime<Utc>,

    pub finished_at: DateTime<Utc>,
}

impl JobResult {
    /// An empty result for a job that has not crawled anything yet
    pub fn empty(config: JobConfig, started_at: DateTime<Utc>) -> Self {
        Self {
            college_name: config.college_name.clone(),
            status: JobStatus::Completed,
            records: Vec::new(),
            pages_visited: 0,
            pages_failed: 0,
            enrichment_failures: 0,
            entries_dropped: 0,
            termination: None,
            start_url: None,
            college_website: None,
            college_contacts: CollegeContacts::default(),
            config,
            started_at,
            finished_at: started_at,
        }
    }

    /// Returns true if the college could not be mapped to a listing page
    pub fn is_unresolved(&self) -> bool {
        self.status == JobStatus::TargetUnresolved
    }

    /// Wall time between job start and finish
    pub fn elapsed(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}
