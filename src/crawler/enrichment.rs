//! Professional-network enrichment
//!
//! Looks each faculty member up on the configured HTML search surface and
//! keeps the LinkedIn profile links it returns. A lookup never fails the job:
//! any problem yields the original stub marked `failed`.

use crate::crawler::contacts::collapse_whitespace;
use crate::crawler::fetcher::RawPage;
use crate::crawler::session::CrawlSession;
use crate::model::{EnrichmentStatus, FacultyRecord, FacultyStub};
use crate::url::{search_url, unwrap_search_redirect, url_matches};
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use url::Url;

/// Domain pattern of accepted profile links
const PROFILE_DOMAIN: &str = "*.linkedin.com";

static SEL_RESULT_LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a.result__a[href]").expect("result link selector"));
static SEL_SNIPPET: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".result__snippet").expect("snippet selector"));

/// One profile link found on a results page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileHit {
    pub url: Url,
    pub snippet: Option<String>,
}

/// Runs the per-record lookup for one job
#[derive(Debug, Clone)]
pub struct Enricher {
    endpoint: Url,
    college: String,
    max_candidates: usize,
}

impl Enricher {
    /// Creates an enricher querying `endpoint` for members of `college`
    pub fn new(endpoint: Url, college: impl Into<String>, max_candidates: usize) -> Self {
        Self {
            endpoint,
            college: college.into(),
            max_candidates: max_candidates.max(1),
        }
    }

    /// Search query for one faculty member
    pub fn query_for(&self, stub: &FacultyStub) -> String {
        format!("{} {} site:linkedin.com", stub.name, self.college)
    }

    /// Looks the stub up once and returns the record
    pub async fn enrich(&self, session: &mut CrawlSession, stub: FacultyStub) -> FacultyRecord {
        let url = search_url(&self.endpoint, &self.query_for(&stub));

        let page = match session.get(&url).await {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!(
                    "Enrichment lookup for '{}' failed ({}): {}",
                    stub.name,
                    e.category(),
                    e
                );
                return FacultyRecord::failed(stub);
            }
        };

        let hits = parse_results(&page, self.max_candidates);
        let Some(best) = hits.first() else {
            tracing::debug!("No profile link found for '{}'", stub.name);
            return FacultyRecord::failed(stub);
        };

        FacultyRecord {
            linkedin_url: Some(best.url.to_string()),
            bio: best.snippet.clone(),
            linkedin_candidates: hits.iter().map(|hit| hit.url.to_string()).collect(),
            enrichment_status: EnrichmentStatus::Succeeded,
            stub,
        }
    }
}

/// Result links of a search results page, unwrapped, in result order
pub fn result_links(page: &RawPage) -> Vec<Url> {
    let document = Html::parse_document(&page.body);
    result_anchors(&document, &page.url)
        .map(|(_, url)| url)
        .collect()
}

/// Extracts up to `limit` distinct profile links, in result order
pub fn parse_results(page: &RawPage, limit: usize) -> Vec<ProfileHit> {
    let document = Html::parse_document(&page.body);
    let mut hits: Vec<ProfileHit> = Vec::new();

    for (anchor, url) in result_anchors(&document, &page.url) {
        if !url_matches(PROFILE_DOMAIN, &url) || hits.iter().any(|hit| hit.url == url) {
            continue;
        }

        hits.push(ProfileHit {
            url,
            snippet: snippet_for(anchor),
        });

        if hits.len() >= limit {
            break;
        }
    }

    hits
}

fn result_anchors<'a>(
    document: &'a Html,
    base: &'a Url,
) -> impl Iterator<Item = (ElementRef<'a>, Url)> + 'a {
    document.select(&SEL_RESULT_LINK).filter_map(move |anchor| {
        let href = anchor.value().attr("href")?;
        unwrap_search_redirect(href, base).map(|url| (anchor, url))
    })
}

/// Snippet text from the result block enclosing the anchor
fn snippet_for(anchor: ElementRef) -> Option<String> {
    let container = anchor.ancestors().filter_map(ElementRef::wrap).find(|el| {
        el.value()
            .attr("class")
            .is_some_and(|class| {
                class
                    .split_whitespace()
                    .any(|token| token == "result" || token == "result__body")
            })
    })?;

    container
        .select(&SEL_SNIPPET)
        .next()
        .map(|snippet| collapse_whitespace(&snippet.text().collect::<Vec<_>>().join(" ")))
        .filter(|text| !text.is_empty())
}
