//! Faculty stubs and enriched records

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which extraction path produced a stub
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntrySource {
    /// A row of a `<table>`
    Table,
    /// A profile-like block (`div`, `section`, `article`, `li`)
    Block,
    /// A site-specific selector rule
    Rule,
}

/// A raw faculty entry as extracted from one listing page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacultyStub {
    pub name: String,

    /// Title or department, when the entry carries one
    pub title: Option<String>,

    /// Absolute URL of the faculty member's profile page
    pub profile_url: Option<String>,

    pub email: Option<String>,

    pub phone: Option<String>,

    pub source: EntrySource,

    /// Listing page the entry was found on
    pub page_url: String,

    /// 1-based index of that listing page within the job
    pub page_index: usize,
}

impl FacultyStub {
    /// Key used to drop repeated entries within a page
    pub(crate) fn dedup_key(&self) -> String {
        match &self.email {
            Some(email) => email.to_lowercase(),
            None => format!(
                "{}|{}",
                self.name.to_lowercase(),
                self.profile_url.as_deref().unwrap_or("")
            ),
        }
    }
}

/// Outcome of the enrichment lookup for one record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrichmentStatus {
    NotAttempted,
    Succeeded,
    Failed,
}

impl fmt::Display for EnrichmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::NotAttempted => "not_attempted",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        };
        write!(f, "{}", s)
    }
}

/// A faculty lead as returned to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacultyRecord {
    #[serde(flatten)]
    pub stub: FacultyStub,

    /// Best professional-network profile found
    pub linkedin_url: Option<String>,

    /// All profile links the lookup returned, best first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub linkedin_candidates: Vec<String>,

    /// Snippet text accompanying the best profile link
    pub bio: Option<String>,

    pub enrichment_status: EnrichmentStatus,
}

impl FacultyRecord {
    /// Wraps a stub that was never sent to enrichment
    pub fn not_attempted(stub: FacultyStub) -> Self {
        Self::with_status(stub, EnrichmentStatus::NotAttempted)
    }

    /// Wraps a stub whose enrichment failed, leaving its fields intact
    pub fn failed(stub: FacultyStub) -> Self {
        Self::with_status(stub, EnrichmentStatus::Failed)
    }

    fn with_status(stub: FacultyStub, status: EnrichmentStatus) -> Self {
        Self {
            stub,
            linkedin_url: None,
            linkedin_candidates: Vec::new(),
            bio: None,
            enrichment_status: status,
        }
    }
}
