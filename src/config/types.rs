use serde::{Deserialize, Serialize};

/// One scrape job, as described by the caller
///
/// Field names match the flat JSON job description. Every field but
/// `college_name` has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobConfig {
    /// College to crawl: a display name, a registry alias, or a listing URL
    pub college_name: String,

    /// Upper bound on listing pages visited
    #[serde(default = "default_max_faculty_pages")]
    pub max_faculty_pages: u32,

    /// Upper bound on entries kept from each listing page
    #[serde(default = "default_max_faculty_per_page")]
    pub max_faculty_per_page: u32,

    /// Whether to run the professional-network lookup per record
    #[serde(default)]
    pub include_linkedin: bool,

    /// Minimum spacing between outbound requests (seconds)
    #[serde(default)]
    pub polite_delay_s: f64,

    /// Deadline for each outbound request (seconds)
    #[serde(default = "default_request_timeout_s")]
    pub request_timeout_s: f64,
}

fn default_max_faculty_pages() -> u32 {
    2
}

fn default_max_faculty_per_page() -> u32 {
    8
}

fn default_request_timeout_s() -> f64 {
    10.0
}

impl JobConfig {
    /// Creates a job for the given college with all defaults
    pub fn new(college_name: impl Into<String>) -> Self {
        Self {
            college_name: college_name.into(),
            max_faculty_pages: default_max_faculty_pages(),
            max_faculty_per_page: default_max_faculty_per_page(),
            include_linkedin: false,
            polite_delay_s: 0.0,
            request_timeout_s: default_request_timeout_s(),
        }
    }

    /// Returns a copy with the bounds lowered to the given hard limits
    ///
    /// Clamping never raises a bound. LinkedIn jobs get the stricter
    /// LinkedIn caps because the search surface is slow and flaky.
    pub fn clamped(&self, limits: &Limits) -> Self {
        let mut job = self.clone();
        job.college_name = job.college_name.trim().to_string();
        job.max_faculty_pages = job.max_faculty_pages.min(limits.max_faculty_pages);
        job.max_faculty_per_page = job.max_faculty_per_page.min(limits.max_faculty_per_page);

        if job.include_linkedin {
            job.max_faculty_pages = job.max_faculty_pages.min(limits.linkedin_max_faculty_pages);
            job.max_faculty_per_page = job
                .max_faculty_per_page
                .min(limits.linkedin_max_faculty_per_page);
        }

        job.request_timeout_s = job.request_timeout_s.min(limits.max_request_timeout_s);
        job.polite_delay_s = job.polite_delay_s.min(limits.max_polite_delay_s);
        job
    }

    /// Upper bound on the number of records this job can return
    pub fn record_capacity(&self) -> usize {
        self.max_faculty_pages as usize * self.max_faculty_per_page as usize
    }
}

/// Process-level settings, loaded from a TOML file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,

    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub limits: Limits,

    /// Known colleges and their listing pages
    #[serde(default, rename = "college")]
    pub colleges: Vec<CollegeEntry>,

    /// Site-specific extraction rules keyed by domain pattern
    #[serde(default, rename = "site")]
    pub sites: Vec<SiteEntry>,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url", default)]
    pub contact_url: Option<String>,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email", default)]
    pub contact_email: Option<String>,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "CollegeLeads".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: None,
            contact_email: None,
        }
    }
}

impl UserAgentConfig {
    /// Formats the header value: `Name/Version (+ContactURL; ContactEmail)`
    pub fn header_value(&self) -> String {
        let base = format!("{}/{}", self.crawler_name, self.crawler_version);
        match (&self.contact_url, &self.contact_email) {
            (Some(url), Some(email)) => format!("{} (+{}; {})", base, url, email),
            (Some(url), None) => format!("{} (+{})", base, url),
            (None, Some(email)) => format!("{} ({})", base, email),
            (None, None) => base,
        }
    }
}

/// Web search surface used for website discovery and enrichment
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// HTML search endpoint; the query is sent as `?q=`
    #[serde(default = "default_search_endpoint")]
    pub endpoint: String,

    /// Fall back to a web search when a college is not in the registry
    #[serde(rename = "discover-websites", default = "default_true")]
    pub discover_websites: bool,

    /// Maximum profile candidates kept per enriched record
    #[serde(rename = "max-candidates", default = "default_max_candidates")]
    pub max_candidates: usize,
}

fn default_search_endpoint() -> String {
    "https://html.duckduckgo.com/html/".to_string()
}

fn default_true() -> bool {
    true
}

fn default_max_candidates() -> usize {
    5
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: default_search_endpoint(),
            discover_websites: true,
            max_candidates: default_max_candidates(),
        }
    }
}

/// Hard caps applied on top of the caller's bounds
#[derive(Debug, Clone, Deserialize)]
pub struct Limits {
    #[serde(rename = "max-faculty-pages", default = "default_cap_pages")]
    pub max_faculty_pages: u32,

    #[serde(rename = "max-faculty-per-page", default = "default_cap_per_page")]
    pub max_faculty_per_page: u32,

    #[serde(rename = "linkedin-max-faculty-pages", default = "default_linkedin_pages")]
    pub linkedin_max_faculty_pages: u32,

    #[serde(
        rename = "linkedin-max-faculty-per-page",
        default = "default_linkedin_per_page"
    )]
    pub linkedin_max_faculty_per_page: u32,

    #[serde(rename = "max-request-timeout-s", default = "default_cap_timeout")]
    pub max_request_timeout_s: f64,

    #[serde(rename = "max-polite-delay-s", default = "default_cap_delay")]
    pub max_polite_delay_s: f64,
}

fn default_cap_pages() -> u32 {
    5
}

fn default_cap_per_page() -> u32 {
    25
}

fn default_linkedin_pages() -> u32 {
    2
}

fn default_linkedin_per_page() -> u32 {
    5
}

fn default_cap_timeout() -> f64 {
    15.0
}

fn default_cap_delay() -> f64 {
    30.0
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_faculty_pages: default_cap_pages(),
            max_faculty_per_page: default_cap_per_page(),
            linkedin_max_faculty_pages: default_linkedin_pages(),
            linkedin_max_faculty_per_page: default_linkedin_per_page(),
            max_request_timeout_s: default_cap_timeout(),
            max_polite_delay_s: default_cap_delay(),
        }
    }
}

/// A known college with its faculty listing page
#[derive(Debug, Clone, Deserialize)]
pub struct CollegeEntry {
    /// Display name
    pub name: String,

    /// Other names the college is looked up by
    #[serde(default)]
    pub aliases: Vec<String>,

    /// First faculty listing page
    #[serde(rename = "listing-url")]
    pub listing_url: String,

    /// College homepage, echoed back in results
    #[serde(default)]
    pub website: Option<String>,

    /// Extraction strategy for the listing's domain
    #[serde(default)]
    pub strategy: Option<StrategyKind>,

    /// Custom selectors, required when `strategy = "selectors"`
    #[serde(default)]
    pub selectors: Option<SelectorRules>,
}

/// Extraction rules for every page on a domain pattern
#[derive(Debug, Clone, Deserialize)]
pub struct SiteEntry {
    /// Domain pattern (e.g., "example.edu" or "*.example.edu")
    pub domain: String,

    pub strategy: StrategyKind,

    #[serde(default)]
    pub selectors: Option<SelectorRules>,
}

/// Extraction strategy names as written in settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    Auto,
    Table,
    ProfileBlocks,
    Selectors,
}

/// CSS selectors for a site whose markup the heuristics do not cover
#[derive(Debug, Clone, Deserialize)]
pub struct SelectorRules {
    /// Selector for each faculty entry
    pub entry: String,

    /// Selector for the name element within an entry
    pub name: String,

    /// Selector for the title or department element within an entry
    #[serde(default)]
    pub title: Option<String>,

    /// Selector for the email element within an entry (`mailto:` link or text)
    #[serde(default)]
    pub email: Option<String>,

    /// Selector for the profile link within an entry
    #[serde(default)]
    pub profile: Option<String>,

    /// Selector for the next-page link on the listing page
    #[serde(default)]
    pub next: Option<String>,
}
