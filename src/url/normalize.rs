use crate::UrlError;
use url::Url;

/// Query parameters that never change which listing page is served
const TRACKING_PARAMS: &[&str] = &["fbclid", "gclid", "mc_eid", "ref", "source"];

/// Parses a user- or page-supplied URL, accepting only HTTP(S) with a host
///
/// # Examples
///
/// ```
/// use college_leads::url::parse_http_url;
///
/// assert!(parse_http_url("https://example.edu/faculty").is_ok());
/// assert!(parse_http_url("mailto:dean@example.edu").is_err());
/// ```
pub fn parse_http_url(url_str: &str) -> Result<Url, UrlError> {
    let url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingDomain);
    }

    Ok(url)
}

/// Builds a comparison key identifying which page a URL serves
///
/// Two listing URLs with the same key are treated as the same page when
/// detecting pagination loops. The key:
///
/// 1. Lowercases the host and drops a `www.` prefix
/// 2. Removes dot segments, repeated slashes and the trailing slash
/// 3. Drops the fragment
/// 4. Drops tracking query parameters and sorts the rest
///
/// The scheme and port are kept as-is.
///
/// # Examples
///
/// ```
/// use college_leads::url::page_key;
/// use url::Url;
///
/// let a = Url::parse("https://WWW.example.edu/faculty/?page=2#top").unwrap();
/// let b = Url::parse("https://example.edu/faculty?page=2").unwrap();
/// assert_eq!(page_key(&a), page_key(&b));
/// ```
pub fn page_key(url: &Url) -> String {
    let host = url
        .host_str()
        .map(|h| h.to_lowercase())
        .unwrap_or_default();
    let host = host.strip_prefix("www.").unwrap_or(&host);

    let port = url.port().map(|p| format!(":{}", p)).unwrap_or_default();
    let path = normalize_path(url.path());

    let params = filter_and_sort_query_params(url);
    let query = if params.is_empty() {
        String::new()
    } else {
        let joined = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");
        format!("?{}", joined)
    };

    format!("{}://{}{}{}{}", url.scheme(), host, port, path, query)
}

/// Normalizes a URL path by removing dot segments and trailing slashes
fn normalize_path(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => continue,
            ".." => {
                segments.pop();
            }
            _ => segments.push(segment),
        }
    }

    format!("/{}", segments.join("/"))
}

/// Filters out tracking parameters and sorts remaining query parameters
fn filter_and_sort_query_params(url: &Url) -> Vec<(String, String)> {
    let mut params: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| !is_tracking_param(key))
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    params.sort();
    params
}

fn is_tracking_param(key: &str) -> bool {
    TRACKING_PARAMS.contains(&key) || key.starts_with("utm_")
}
