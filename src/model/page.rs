//! Per-page extraction outcomes

use crate::model::FacultyStub;
use serde::Serialize;
use std::fmt;
use url::Url;

/// Status of one fetch-and-extract cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageStatus {
    /// Page fetched and at least one entry extracted
    Ok,
    /// The fetch for this page failed
    FetchFailed,
    /// Page fetched but no entries could be extracted
    ParseEmpty,
}

/// Result of fetching and extracting a single listing page
#[derive(Debug, Clone)]
pub struct PageResult {
    /// Stubs in document order
    pub stubs: Vec<FacultyStub>,

    /// Locator of the following listing page, if one was found
    pub next_page: Option<Url>,

    pub status: PageStatus,

    /// Candidate entries discarded for lacking a name
    pub dropped: usize,
}

impl PageResult {
    /// A page whose fetch failed
    pub fn fetch_failed() -> Self {
        Self {
            stubs: Vec::new(),
            next_page: None,
            status: PageStatus::FetchFailed,
            dropped: 0,
        }
    }

    /// A page that yielded nothing usable
    pub fn parse_empty(dropped: usize) -> Self {
        Self {
            stubs: Vec::new(),
            next_page: None,
            status: PageStatus::ParseEmpty,
            dropped,
        }
    }
}

/// Why the pagination loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// The page-count bound was reached
    PageLimit,
    /// The last page had no next-page locator
    NoNextPage,
    /// A listing page could not be fetched
    FetchFailed,
    /// A listing page yielded no entries
    ParseEmpty,
    /// The next-page locator pointed back at a visited page
    Loop,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::PageLimit => "page limit reached",
            Self::NoNextPage => "no next page",
            Self::FetchFailed => "fetch failed",
            Self::ParseEmpty => "page had no entries",
            Self::Loop => "pagination loop",
        };
        write!(f, "{}", s)
    }
}
