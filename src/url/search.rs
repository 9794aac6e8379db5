use url::Url;

/// Builds a search request URL for the given query
///
/// The query is sent as the `q` parameter of the configured endpoint.
pub fn search_url(endpoint: &Url, query: &str) -> Url {
    let mut url = endpoint.clone();
    url.query_pairs_mut().append_pair("q", query);
    url
}

/// Resolves a search result link to its destination
///
/// HTML search pages wrap result links in a redirect of the form
/// `/l/?uddg=<percent-encoded target>`, often protocol-relative. This returns
/// the target for such links and the resolved link otherwise. Links that do not
/// lead to an HTTP(S) page yield `None`.
///
/// # Examples
///
/// ```
/// use college_leads::url::unwrap_search_redirect;
/// use url::Url;
///
/// let base = Url::parse("https://html.duckduckgo.com/html/").unwrap();
/// let href = "//duckduckgo.com/l/?uddg=https%3A%2F%2Fwww.example.edu%2F&rut=abc";
/// let target = unwrap_search_redirect(href, &base).unwrap();
/// assert_eq!(target.as_str(), "https://www.example.edu/");
/// ```
pub fn unwrap_search_redirect(href: &str, base: &Url) -> Option<Url> {
    let resolved = base.join(href.trim()).ok()?;

    let target = if resolved.path().starts_with("/l/") {
        resolved
            .query_pairs()
            .find(|(key, _)| key == "uddg")
            .and_then(|(_, value)| Url::parse(&value).ok())
            .unwrap_or(resolved)
    } else {
        resolved
    };

    matches!(target.scheme(), "http" | "https").then_some(target)
}
