//! Target resolution
//!
//! Maps the caller's `college_name` to the first listing page to crawl:
//! 1. A name that is itself an HTTP(S) URL is crawled directly
//! 2. The `[[college]]` registry, matched on name or alias
//! 3. Website discovery through the search surface, when enabled
//!
//! Discovery also collects the contact details printed on the homepage.

use crate::config::{CollegeEntry, Settings};
use crate::crawler::contacts::{collapse_whitespace, find_emails, find_phones};
use crate::crawler::enrichment::result_links;
use crate::crawler::rules::ExtractionStrategy;
use crate::crawler::session::CrawlSession;
use crate::model::CollegeContacts;
use crate::url::{extract_domain, page_key, parse_http_url, resolve_link, search_url};
use crate::ConfigError;
use regex::Regex;
use scraper::{Html, Selector};
use std::sync::LazyLock;
use url::Url;

static RE_LISTING_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)faculty|staff|professor|teachers|department|people|directory")
        .expect("listing link pattern")
});

static SEL_ANCHOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("anchor selector"));

/// Where a job starts crawling
#[derive(Debug, Clone)]
pub struct ResolvedTarget {
    pub listing_url: Url,

    /// Name used in enrichment queries
    pub display_name: String,

    pub website: Option<Url>,

    pub contacts: CollegeContacts,

    /// Strategy pinned by a registry entry, if any
    pub strategy: Option<ExtractionStrategy>,
}

/// Outcome of resolving a college name
#[derive(Debug, Clone)]
pub enum Resolution {
    Resolved(ResolvedTarget),
    /// No listing page could be found; discovery may still have found a website
    Unresolved {
        website: Option<Url>,
        contacts: CollegeContacts,
    },
}

/// Resolves college names against settings and the search surface
pub struct TargetResolver<'a> {
    settings: &'a Settings,
    search_endpoint: Url,
}

impl<'a> TargetResolver<'a> {
    pub fn new(settings: &'a Settings) -> Result<Self, ConfigError> {
        let search_endpoint = Url::parse(&settings.search.endpoint).map_err(|e| {
            ConfigError::InvalidUrl(format!(
                "search endpoint '{}': {}",
                settings.search.endpoint, e
            ))
        })?;

        Ok(Self {
            settings,
            search_endpoint,
        })
    }

    pub fn search_endpoint(&self) -> &Url {
        &self.search_endpoint
    }

    pub async fn resolve(
        &self,
        session: &mut CrawlSession,
        college_name: &str,
    ) -> Result<Resolution, ConfigError> {
        if let Ok(url) = parse_http_url(college_name) {
            tracing::debug!("Using '{}' directly as the listing URL", url);
            let display_name = extract_domain(&url)
                .map(|d| d.trim_start_matches("www.").to_string())
                .unwrap_or_else(|| college_name.to_string());

            return Ok(Resolution::Resolved(ResolvedTarget {
                listing_url: url,
                display_name,
                website: None,
                contacts: CollegeContacts::default(),
                strategy: None,
            }));
        }

        if let Some(entry) = find_college(&self.settings.colleges, college_name) {
            tracing::debug!("Matched registry entry '{}'", entry.name);
            return registry_target(entry).map(Resolution::Resolved);
        }

        if !self.settings.search.discover_websites {
            tracing::info!("'{}' is not in the registry and discovery is off", college_name);
            return Ok(Resolution::Unresolved {
                website: None,
                contacts: CollegeContacts::default(),
            });
        }

        Ok(self.discover(session, college_name).await)
    }

    /// Finds the website through search, then a listing link on its homepage
    async fn discover(&self, session: &mut CrawlSession, college_name: &str) -> Resolution {
        let unresolved = |website: Option<Url>, contacts: CollegeContacts| Resolution::Unresolved {
            website,
            contacts,
        };

        let query = format!("{} official website", college_name);
        let results = match session.get(&search_url(&self.search_endpoint, &query)).await {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!("Website search for '{}' failed: {}", college_name, e);
                return unresolved(None, CollegeContacts::default());
            }
        };

        let Some(website) = result_links(&results).into_iter().next() else {
            tracing::info!("No website found for '{}'", college_name);
            return unresolved(None, CollegeContacts::default());
        };
        tracing::info!("Discovered website {} for '{}'", website, college_name);

        let homepage = match session.get(&website).await {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!("Homepage {} failed: {}", website, e);
                return unresolved(Some(website), CollegeContacts::default());
            }
        };

        let document = Html::parse_document(&homepage.body);
        let text = collapse_whitespace(&document.root_element().text().collect::<Vec<_>>().join(" "));
        let contacts = CollegeContacts {
            emails: find_emails(&text),
            phones: find_phones(&text),
        };

        match find_listing_link(&document, &homepage.url) {
            Some(listing_url) => Resolution::Resolved(ResolvedTarget {
                listing_url,
                display_name: college_name.to_string(),
                website: Some(website),
                contacts,
                strategy: None,
            }),
            None => {
                tracing::info!("No faculty link on {}", homepage.url);
                unresolved(Some(website), contacts)
            }
        }
    }
}

/// Registry lookup ignoring case and whitespace differences
pub fn find_college<'s>(colleges: &'s [CollegeEntry], name: &str) -> Option<&'s CollegeEntry> {
    let wanted = normalize_name(name);
    colleges.iter().find(|entry| {
        std::iter::once(&entry.name)
            .chain(entry.aliases.iter())
            .any(|candidate| normalize_name(candidate) == wanted)
    })
}

fn normalize_name(name: &str) -> String {
    collapse_whitespace(name).to_lowercase()
}

fn registry_target(entry: &CollegeEntry) -> Result<ResolvedTarget, ConfigError> {
    let listing_url = parse_http_url(&entry.listing_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("listing-url of '{}': {}", entry.name, e)))?;
    let website = entry
        .website
        .as_deref()
        .map(parse_http_url)
        .transpose()
        .map_err(|e| ConfigError::InvalidUrl(format!("website of '{}': {}", entry.name, e)))?;
    let strategy = entry
        .strategy
        .map(|kind| ExtractionStrategy::from_config(kind, entry.selectors.as_ref()))
        .transpose()?;

    Ok(ResolvedTarget {
        listing_url,
        display_name: entry.name.clone(),
        website,
        contacts: CollegeContacts::default(),
        strategy,
    })
}

/// First homepage link whose text or href names a faculty listing
fn find_listing_link(document: &Html, homepage: &Url) -> Option<Url> {
    let home_key = page_key(homepage);

    document.select(&SEL_ANCHOR).find_map(|anchor| {
        let href = anchor.value().attr("href")?;
        let text = anchor.text().collect::<String>();
        if !RE_LISTING_LINK.is_match(&text) && !RE_LISTING_LINK.is_match(href) {
            return None;
        }
        resolve_link(href, homepage).filter(|url| page_key(url) != home_key)
    })
}
