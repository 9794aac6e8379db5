use url::Url;

/// Extracts the lowercase host of a URL, without port
///
/// # Examples
///
/// ```
/// use url::Url;
/// use college_leads::url::extract_domain;
///
/// let url = Url::parse("https://Faculty.Example.EDU:8443/list").unwrap();
/// assert_eq!(extract_domain(&url), Some("faculty.example.edu".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Checks if a host matches a site rule's domain pattern
///
/// Two kinds of pattern are supported:
/// 1. Exact: "example.edu" matches only "example.edu"
/// 2. Wildcard: "*.example.edu" matches "example.edu" and any subdomain of it
///
/// Matching is case-insensitive, so callers may pass hosts straight from a URL.
///
/// # Examples
///
/// ```
/// use college_leads::url::matches_wildcard;
///
/// assert!(matches_wildcard("example.edu", "EXAMPLE.edu"));
/// assert!(matches_wildcard("*.example.edu", "cs.example.edu"));
/// assert!(!matches_wildcard("*.example.edu", "myexample.edu"));
/// ```
pub fn matches_wildcard(pattern: &str, candidate: &str) -> bool {
    let pattern = pattern.to_lowercase();
    let candidate = candidate.to_lowercase();

    match pattern.strip_prefix("*.") {
        Some(base) => candidate == base || candidate.ends_with(&format!(".{}", base)),
        None => candidate == pattern,
    }
}

/// Returns true if the URL's host matches the pattern
pub fn url_matches(pattern: &str, url: &Url) -> bool {
    extract_domain(url)
        .map(|domain| matches_wildcard(pattern, &domain))
        .unwrap_or(false)
}
