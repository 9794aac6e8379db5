//! Pagination controller
//!
//! Walks a listing from its first page, following next-page links until the
//! page bound, a missing next link, a failed or empty page, or a loop back to
//! a visited page. Stubs from pages processed before a failure are kept.

use crate::config::JobConfig;
use crate::crawler::extractor::Extractor;
use crate::crawler::session::CrawlSession;
use crate::model::{FacultyStub, PageResult, PageStatus, Termination};
use crate::url::page_key;
use std::collections::HashSet;
use url::Url;

/// What a pagination run produced
#[derive(Debug, Clone)]
pub struct PaginationOutcome {
    /// Stubs in discovery order, already truncated per page
    pub stubs: Vec<FacultyStub>,
    /// Listing fetches attempted
    pub pages_visited: usize,
    pub pages_failed: usize,
    pub entries_dropped: usize,
    pub termination: Termination,
}

/// Bounded walk over a listing's pages
#[derive(Debug, Clone)]
pub struct Paginator {
    extractor: Extractor,
    max_pages: usize,
    per_page: usize,
}

impl Paginator {
    pub fn new(extractor: Extractor, max_pages: usize, per_page: usize) -> Self {
        Self {
            extractor,
            max_pages,
            per_page,
        }
    }

    /// Uses the (already clamped) bounds of a job
    pub fn for_job(extractor: Extractor, job: &JobConfig) -> Self {
        Self::new(
            extractor,
            job.max_faculty_pages as usize,
            job.max_faculty_per_page as usize,
        )
    }

    pub async fn run(&self, session: &mut CrawlSession, start: Url) -> PaginationOutcome {
        let mut stubs = Vec::new();
        let mut pages_visited = 0;
        let mut pages_failed = 0;
        let mut entries_dropped = 0;
        let mut visited = HashSet::new();
        let mut next = Some(start);

        let termination = loop {
            let Some(url) = next.take() else {
                break Termination::NoNextPage;
            };

            if pages_visited >= self.max_pages {
                tracing::debug!("Page limit {} reached before {}", self.max_pages, url);
                break Termination::PageLimit;
            }

            if !visited.insert(page_key(&url)) {
                tracing::debug!("Next link {} loops to a visited page", url);
                break Termination::Loop;
            }

            pages_visited += 1;
            let page_index = pages_visited;

            let mut result = match session.get(&url).await {
                Ok(page) => {
                    visited.insert(page_key(&page.url));
                    self.extractor.extract(&page, page_index)
                }
                Err(e) => {
                    tracing::warn!(
                        "Listing page {} ({}) failed: {} [{}]",
                        page_index,
                        url,
                        e,
                        e.category()
                    );
                    PageResult::fetch_failed()
                }
            };

            entries_dropped += result.dropped;

            match result.status {
                PageStatus::FetchFailed => {
                    pages_failed += 1;
                    break Termination::FetchFailed;
                }
                PageStatus::ParseEmpty => {
                    tracing::info!("Listing page {} ({}) had no entries", page_index, url);
                    break Termination::ParseEmpty;
                }
                PageStatus::Ok => {}
            }

            let found = result.stubs.len();
            result.stubs.truncate(self.per_page);
            tracing::info!(
                "Listing page {}: kept {} of {} entries from {}",
                page_index,
                result.stubs.len(),
                found,
                url
            );

            stubs.extend(result.stubs);
            next = result.next_page;
        };

        tracing::debug!(
            "Pagination finished after {} page(s): {}",
            pages_visited,
            termination
        );

        PaginationOutcome {
            stubs,
            pages_visited,
            pages_failed,
            entries_dropped,
            termination,
        }
    }
}
