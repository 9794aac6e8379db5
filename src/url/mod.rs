//! URL handling module for College Leads
//!
//! This module provides URL validation, page identity keys for loop detection,
//! domain pattern matching for site rules, and search-result link helpers.

mod matcher;
mod normalize;
mod search;

pub use matcher::{extract_domain, matches_wildcard, url_matches};
pub use normalize::{page_key, parse_http_url};
pub use search::{search_url, unwrap_search_redirect};

use url::Url;

/// Resolves a link href found on a page to an absolute HTTP(S) URL
///
/// Returns None if the link should be ignored:
/// - `javascript:`, `mailto:`, `tel:` and `data:` links
/// - Fragment-only links (same page anchors)
/// - Links that fail to resolve or resolve to a non-HTTP(S) scheme
///
/// # Examples
///
/// ```
/// use college_leads::url::resolve_link;
/// use url::Url;
///
/// let base = Url::parse("https://example.edu/faculty/").unwrap();
/// let link = resolve_link("people/rao", &base).unwrap();
/// assert_eq!(link.as_str(), "https://example.edu/faculty/people/rao");
/// assert!(resolve_link("#top", &base).is_none());
/// ```
pub fn resolve_link(href: &str, base: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lower = href.to_ascii_lowercase();
    if ["javascript:", "mailto:", "tel:", "data:"]
        .iter()
        .any(|scheme| lower.starts_with(scheme))
    {
        return None;
    }

    let absolute = base.join(href).ok()?;
    matches!(absolute.scheme(), "http" | "https").then_some(absolute)
}
