//! Listing page extractor
//!
//! Turns a fetched listing page into faculty stubs plus the locator of the
//! following page.
//!
//! # Entry Rules
//!
//! An element is a candidate entry when it carries an email address or a
//! link. Candidates without a recognizable name are dropped and counted.
//! Entries repeated within a page (same email, or same name and profile link)
//! are kept once.
//!
//! # Next Page Rules
//!
//! Tried in order, first usable link wins:
//! 1. A configured `next` selector (selector strategy only)
//! 2. `rel="next"` on `<link>` or `<a>`
//! 3. An anchor whose text, class, `aria-label` or parent class says "next"
//! 4. An anchor numbered `page_index + 1` inside a pagination container
//!
//! Links resolving to the current page are never used.

use crate::crawler::contacts::{
    collapse_whitespace, email_from_mailto, find_email, find_phone, phone_from_tel,
};
use crate::crawler::fetcher::RawPage;
use crate::crawler::rules::{CompiledSelectors, ExtractionStrategy};
use crate::model::{EntrySource, FacultyStub, PageResult, PageStatus};
use crate::url::{page_key, resolve_link};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;
use url::Url;

/// Longest text accepted as a person's name
const MAX_NAME_LEN: usize = 100;

/// Link and label texts that are never names or titles
const LABEL_WORDS: &[&str] = &[
    "contact",
    "e-mail",
    "email",
    "home page",
    "homepage",
    "more",
    "phone",
    "profile",
    "read more",
    "view",
    "view profile",
    "website",
];

static RE_BLOCK_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)faculty|staff|profile|member|person|people|directory")
        .expect("block class pattern")
});

static SEL_ANCHOR: LazyLock<Selector> = LazyLock::new(|| selector("a[href]"));
static SEL_ROW: LazyLock<Selector> = LazyLock::new(|| selector("tr"));
static SEL_BLOCK: LazyLock<Selector> =
    LazyLock::new(|| selector("div[class], section[class], article[class], li[class]"));
static SEL_AUTO: LazyLock<Selector> =
    LazyLock::new(|| selector("tr, div[class], section[class], article[class], li[class]"));
static SEL_NAME: LazyLock<Selector> =
    LazyLock::new(|| selector("h1, h2, h3, h4, h5, h6, [class*='name'], strong, b"));
static SEL_TITLE: LazyLock<Selector> = LazyLock::new(|| {
    selector(
        "[class*='title'], [class*='designation'], [class*='position'], \
         [class*='department'], [class*='dept'], [class*='role']",
    )
});
static SEL_REL_NEXT: LazyLock<Selector> =
    LazyLock::new(|| selector("link[rel~='next'][href], a[rel~='next'][href]"));

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector")
}

/// Contact details found inside one element
#[derive(Debug, Default)]
struct Contact {
    email: Option<String>,
    phone: Option<String>,
    profile_url: Option<Url>,
}

impl Contact {
    fn is_candidate(&self) -> bool {
        self.email.is_some() || self.profile_url.is_some()
    }
}

/// An entry before the name requirement is applied
#[derive(Debug)]
struct Candidate {
    name: Option<String>,
    title: Option<String>,
    contact: Contact,
    source: EntrySource,
}

/// Extracts faculty entries with a fixed strategy
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    strategy: ExtractionStrategy,
}

impl Extractor {
    pub fn new(strategy: ExtractionStrategy) -> Self {
        Self { strategy }
    }

    /// Extracts stubs and the next-page locator from a fetched page
    ///
    /// Stubs come back in document order, untruncated. A page with no
    /// usable entry yields `parse_empty` and no next page.
    pub fn extract(&self, page: &RawPage, page_index: usize) -> PageResult {
        let document = Html::parse_document(&page.body);
        let base = &page.url;

        let candidates = match &self.strategy {
            ExtractionStrategy::Auto => auto_candidates(&document, base),
            ExtractionStrategy::Table => document
                .select(&SEL_ROW)
                .filter_map(|row| row_candidate(row, base))
                .collect(),
            ExtractionStrategy::ProfileBlocks => innermost_blocks(&document, base)
                .into_iter()
                .map(|(block, contact)| block_candidate(block, contact))
                .collect(),
            ExtractionStrategy::Selectors(rules) => document
                .select(&rules.entry)
                .filter_map(|el| rule_candidate(el, rules, base))
                .collect(),
        };

        let mut stubs = Vec::new();
        let mut seen = HashSet::new();
        let mut dropped = 0;

        for candidate in candidates {
            let Some(name) = candidate.name else {
                dropped += 1;
                tracing::debug!(
                    "Dropping unnamed entry on {} (email: {:?}, profile: {:?})",
                    base,
                    candidate.contact.email,
                    candidate.contact.profile_url.as_ref().map(Url::as_str)
                );
                continue;
            };

            let stub = FacultyStub {
                name,
                title: candidate.title,
                profile_url: candidate.contact.profile_url.map(String::from),
                email: candidate.contact.email,
                phone: candidate.contact.phone,
                source: candidate.source,
                page_url: base.to_string(),
                page_index,
            };

            if seen.insert(stub.dedup_key()) {
                stubs.push(stub);
            }
        }

        if stubs.is_empty() {
            return PageResult::parse_empty(dropped);
        }

        let next_page = self.next_page(&document, base, page_index);

        PageResult {
            stubs,
            next_page,
            status: PageStatus::Ok,
            dropped,
        }
    }

    fn next_page(&self, document: &Html, current: &Url, page_index: usize) -> Option<Url> {
        let current_key = page_key(current);
        let usable = |el: ElementRef| {
            el.value()
                .attr("href")
                .and_then(|href| resolve_link(href, current))
                .filter(|url| page_key(url) != current_key)
        };

        if let ExtractionStrategy::Selectors(rules) = &self.strategy {
            if let Some(next) = &rules.next {
                if let Some(url) = document.select(next).find_map(usable) {
                    return Some(url);
                }
            }
        }

        let wanted = (page_index + 1).to_string();

        document
            .select(&SEL_REL_NEXT)
            .find_map(usable)
            .or_else(|| {
                document
                    .select(&SEL_ANCHOR)
                    .filter(|a| signals_next(*a))
                    .find_map(usable)
            })
            .or_else(|| {
                document
                    .select(&SEL_ANCHOR)
                    .filter(|a| element_text(*a) == wanted && in_pagination(*a))
                    .find_map(usable)
            })
    }
}

/// Table rows and profile blocks in document order
fn auto_candidates(document: &Html, base: &Url) -> Vec<Candidate> {
    let mut blocks: HashMap<_, _> = innermost_blocks(document, base)
        .into_iter()
        .filter(|(block, _)| block.select(&SEL_ROW).next().is_none())
        .map(|(block, contact)| (block.id(), (block, contact)))
        .collect();

    document
        .select(&SEL_AUTO)
        .filter_map(|el| {
            if el.value().name() == "tr" {
                row_candidate(el, base)
            } else {
                blocks
                    .remove(&el.id())
                    .map(|(block, contact)| block_candidate(block, contact))
            }
        })
        .collect()
}

/// Innermost candidate profile blocks with their contacts, in document order
///
/// Each block's contact is collected once. A block is skipped when a nested
/// profile block is itself a candidate.
fn innermost_blocks<'a>(document: &'a Html, base: &Url) -> Vec<(ElementRef<'a>, Contact)> {
    let blocks: Vec<(ElementRef<'a>, Contact)> = document
        .select(&SEL_BLOCK)
        .filter(|el| is_profile_block(*el))
        .map(|el| (el, contact_of(el, base)))
        .collect();

    // Ancestors of a candidate block are never innermost
    let mut shadowed = HashSet::new();
    for (block, contact) in &blocks {
        if contact.is_candidate() {
            for ancestor in block.ancestors() {
                if !shadowed.insert(ancestor.id()) {
                    break;
                }
            }
        }
    }

    blocks
        .into_iter()
        .filter(|(block, contact)| contact.is_candidate() && !shadowed.contains(&block.id()))
        .collect()
}

fn row_candidate(row: ElementRef, base: &Url) -> Option<Candidate> {
    let cells: Vec<ElementRef> = row
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|c| matches!(c.value().name(), "td" | "th"))
        .collect();

    if cells.len() < 2 || cells.iter().all(|c| c.value().name() == "th") {
        return None;
    }

    let contact = contact_of(row, base);
    if !contact.is_candidate() {
        return None;
    }

    let texts: Vec<String> = cells.iter().map(|c| element_text(*c)).collect();
    let name_at = texts.iter().position(|t| clean_name(t).is_some());
    let name = name_at.and_then(|i| clean_name(&texts[i]));
    let title = name_at.and_then(|i| {
        texts[i + 1..]
            .iter()
            .find(|t| is_descriptive(t))
            .cloned()
    });

    Some(Candidate {
        name,
        title,
        contact,
        source: EntrySource::Table,
    })
}

fn block_candidate(block: ElementRef, contact: Contact) -> Candidate {
    let name = block
        .select(&SEL_NAME)
        .find_map(|el| clean_name(&element_text(el)))
        .or_else(|| {
            block
                .select(&SEL_ANCHOR)
                .filter(|a| is_page_link(*a))
                .find_map(|a| clean_name(&element_text(a)))
        });

    let title = block
        .select(&SEL_TITLE)
        .map(element_text)
        .find(|t| is_descriptive(t) && Some(t) != name.as_ref());

    Candidate {
        name,
        title,
        contact,
        source: EntrySource::Block,
    }
}

fn rule_candidate(entry: ElementRef, rules: &CompiledSelectors, base: &Url) -> Option<Candidate> {
    let fallback = contact_of(entry, base);

    let email = first_match(entry, rules.email.as_ref())
        .and_then(|el| {
            el.value()
                .attr("href")
                .and_then(email_from_mailto)
                .or_else(|| find_email(&element_text(el)))
        })
        .or(fallback.email);

    let profile_url = first_match(entry, rules.profile.as_ref())
        .and_then(|el| el.value().attr("href"))
        .and_then(|href| resolve_link(href, base))
        .or(fallback.profile_url);

    let contact = Contact {
        email,
        phone: fallback.phone,
        profile_url,
    };
    if !contact.is_candidate() {
        return None;
    }

    let name = entry
        .select(&rules.name)
        .next()
        .and_then(|el| clean_name(&element_text(el)));
    let title = first_match(entry, rules.title.as_ref())
        .map(element_text)
        .filter(|t| !t.is_empty());

    Some(Candidate {
        name,
        title,
        contact,
        source: EntrySource::Rule,
    })
}

fn first_match<'a>(entry: ElementRef<'a>, selector: Option<&Selector>) -> Option<ElementRef<'a>> {
    selector.and_then(|s| entry.select(s).next())
}

/// Collects the first email, phone and page link inside an element
///
/// `mailto:` and `tel:` links take precedence over text matches.
fn contact_of(el: ElementRef, base: &Url) -> Contact {
    let mut contact = Contact::default();

    for anchor in el.select(&SEL_ANCHOR) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };

        if contact.email.is_none() {
            contact.email = email_from_mailto(href);
        }
        if contact.phone.is_none() {
            contact.phone = phone_from_tel(href);
        }
        if contact.profile_url.is_none() {
            contact.profile_url = resolve_link(href, base);
        }
    }

    if contact.email.is_none() || contact.phone.is_none() {
        let text = element_text(el);
        contact.email = contact.email.or_else(|| find_email(&text));
        contact.phone = contact.phone.or_else(|| find_phone(&text));
    }

    contact
}

fn is_profile_block(el: ElementRef) -> bool {
    matches!(el.value().name(), "div" | "section" | "article" | "li")
        && el
            .value()
            .attr("class")
            .is_some_and(|class| RE_BLOCK_CLASS.is_match(class))
}

fn is_page_link(anchor: ElementRef) -> bool {
    anchor.value().attr("href").is_some_and(|href| {
        email_from_mailto(href).is_none() && phone_from_tel(href).is_none()
    })
}

fn signals_next(anchor: ElementRef) -> bool {
    let text = element_text(anchor).to_lowercase();
    let stripped = text.trim_matches(|c: char| c.is_whitespace() || "›»>→".contains(c));
    if stripped == "next" || stripped == "next page" || (stripped.is_empty() && !text.is_empty())
    {
        return true;
    }

    let attrs = anchor.value();
    if attrs.attr("class").is_some_and(class_signals_next) {
        return true;
    }
    if attrs
        .attr("aria-label")
        .is_some_and(|label| label.to_lowercase().contains("next"))
    {
        return true;
    }

    anchor
        .parent()
        .and_then(ElementRef::wrap)
        .and_then(|parent| parent.value().attr("class"))
        .is_some_and(class_signals_next)
}

/// Matches class tokens like `next`, `page-next` or `next_link`
fn class_signals_next(class: &str) -> bool {
    class.split_whitespace().any(|token| {
        token
            .to_lowercase()
            .split(['-', '_'])
            .any(|part| part == "next")
    })
}

fn in_pagination(anchor: ElementRef) -> bool {
    anchor.ancestors().filter_map(ElementRef::wrap).any(|el| {
        ["class", "id"]
            .iter()
            .filter_map(|attr| el.value().attr(attr))
            .any(|value| value.to_lowercase().contains("pag"))
    })
}

fn element_text(el: ElementRef) -> String {
    collapse_whitespace(&el.text().collect::<Vec<_>>().join(" "))
}

/// Text that could describe a person: has letters, is not contact data or a label
fn is_descriptive(text: &str) -> bool {
    let lower = text.to_lowercase();
    !text.is_empty()
        && text.chars().any(char::is_alphabetic)
        && !text.contains('@')
        && find_phone(text).is_none()
        && !LABEL_WORDS.contains(&lower.trim_end_matches(':'))
}

fn clean_name(raw: &str) -> Option<String> {
    let name = collapse_whitespace(raw);
    (is_descriptive(&name) && name.chars().count() <= MAX_NAME_LEN).then_some(name)
}
