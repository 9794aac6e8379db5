//! Contact detail patterns shared by listing extraction and homepage discovery

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

static RE_EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("email pattern")
});

// Indian numbers first, then international and bare ten-digit forms
static RE_PHONES: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        r"\+?91[-.\s]?\d{10}",
        r"\+?\d{1,3}[-.\s]?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}",
        r"\d{3}[-.\s]?\d{3}[-.\s]?\d{4}",
    ]
    .map(|p| Regex::new(p).expect("phone pattern"))
});

/// First email address in the text
pub fn find_email(text: &str) -> Option<String> {
    RE_EMAIL.find(text).map(|m| m.as_str().to_string())
}

/// All distinct email addresses in the text, sorted
pub fn find_emails(text: &str) -> Vec<String> {
    RE_EMAIL
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// First phone number in the text, trying the patterns in order
pub fn find_phone(text: &str) -> Option<String> {
    RE_PHONES
        .iter()
        .find_map(|re| re.find(text))
        .map(|m| m.as_str().trim().to_string())
}

/// All distinct phone numbers any pattern finds in the text, sorted
pub fn find_phones(text: &str) -> Vec<String> {
    RE_PHONES
        .iter()
        .flat_map(|re| re.find_iter(text))
        .map(|m| m.as_str().trim().to_string())
        .filter(|p| !p.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Email address of a `mailto:` href, without query
pub fn email_from_mailto(href: &str) -> Option<String> {
    let href = href.trim();
    let rest = href
        .get(..7)
        .filter(|scheme| scheme.eq_ignore_ascii_case("mailto:"))
        .map(|_| &href[7..])?;
    let address = rest.split('?').next().unwrap_or(rest);
    find_email(address)
}

/// Phone number of a `tel:` href
pub fn phone_from_tel(href: &str) -> Option<String> {
    let href = href.trim();
    let rest = href
        .get(..4)
        .filter(|scheme| scheme.eq_ignore_ascii_case("tel:"))
        .map(|_| href[4..].trim())?;
    (!rest.is_empty()).then(|| rest.to_string())
}

/// Collapses runs of whitespace into single spaces and trims
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
