use crate::config::types::{
    CollegeEntry, JobConfig, Limits, SearchConfig, SelectorRules, Settings, SiteEntry,
    StrategyKind, UserAgentConfig,
};
use crate::ConfigError;
use scraper::Selector;
use url::Url;

/// Validates a job description
///
/// This is the only check that can fail a job, and it runs before any
/// network activity.
pub fn validate_job(job: &JobConfig) -> Result<(), ConfigError> {
    if job.college_name.trim().is_empty() {
        return Err(ConfigError::Validation(
            "college_name cannot be empty".to_string(),
        ));
    }

    if job.max_faculty_pages == 0 {
        return Err(ConfigError::Validation(
            "max_faculty_pages must be > 0".to_string(),
        ));
    }

    if job.max_faculty_per_page == 0 {
        return Err(ConfigError::Validation(
            "max_faculty_per_page must be > 0".to_string(),
        ));
    }

    if !job.polite_delay_s.is_finite() || job.polite_delay_s < 0.0 {
        return Err(ConfigError::Validation(format!(
            "polite_delay_s must be >= 0, got {}",
            job.polite_delay_s
        )));
    }

    if !job.request_timeout_s.is_finite() || job.request_timeout_s <= 0.0 {
        return Err(ConfigError::Validation(format!(
            "request_timeout_s must be > 0, got {}",
            job.request_timeout_s
        )));
    }

    Ok(())
}

/// Validates the entire settings file
pub fn validate_settings(settings: &Settings) -> Result<(), ConfigError> {
    validate_user_agent_config(&settings.user_agent)?;
    validate_search_config(&settings.search)?;
    validate_limits(&settings.limits)?;
    validate_colleges(&settings.colleges)?;
    validate_sites(&settings.sites)?;
    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Validate crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    if let Some(contact_url) = &config.contact_url {
        Url::parse(contact_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;
    }

    if let Some(email) = &config.contact_email {
        validate_email(email)?;
    }

    Ok(())
}

fn validate_search_config(config: &SearchConfig) -> Result<(), ConfigError> {
    validate_http_url("search.endpoint", &config.endpoint)?;

    if config.max_candidates == 0 {
        return Err(ConfigError::Validation(
            "search.max-candidates must be >= 1".to_string(),
        ));
    }

    Ok(())
}

fn validate_limits(limits: &Limits) -> Result<(), ConfigError> {
    let counts = [
        ("max-faculty-pages", limits.max_faculty_pages),
        ("max-faculty-per-page", limits.max_faculty_per_page),
        ("linkedin-max-faculty-pages", limits.linkedin_max_faculty_pages),
        (
            "linkedin-max-faculty-per-page",
            limits.linkedin_max_faculty_per_page,
        ),
    ];

    for (name, value) in counts {
        if value == 0 {
            return Err(ConfigError::Validation(format!(
                "limits.{} must be >= 1",
                name
            )));
        }
    }

    if !limits.max_request_timeout_s.is_finite() || limits.max_request_timeout_s <= 0.0 {
        return Err(ConfigError::Validation(format!(
            "limits.max-request-timeout-s must be > 0, got {}",
            limits.max_request_timeout_s
        )));
    }

    if !limits.max_polite_delay_s.is_finite() || limits.max_polite_delay_s < 0.0 {
        return Err(ConfigError::Validation(format!(
            "limits.max-polite-delay-s must be >= 0, got {}",
            limits.max_polite_delay_s
        )));
    }

    Ok(())
}

/// Validates college registry entries
fn validate_colleges(colleges: &[CollegeEntry]) -> Result<(), ConfigError> {
    for entry in colleges {
        if entry.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "college name cannot be empty".to_string(),
            ));
        }

        validate_http_url(&format!("listing-url of '{}'", entry.name), &entry.listing_url)?;

        if let Some(website) = &entry.website {
            validate_http_url(&format!("website of '{}'", entry.name), website)?;
        }

        if let Some(kind) = entry.strategy {
            validate_strategy(&entry.name, kind, entry.selectors.as_ref())?;
        }
    }

    Ok(())
}

/// Validates site rule entries
fn validate_sites(sites: &[SiteEntry]) -> Result<(), ConfigError> {
    for entry in sites {
        validate_domain_pattern(&entry.domain)?;
        validate_strategy(&entry.domain, entry.strategy, entry.selectors.as_ref())?;
    }
    Ok(())
}

fn validate_strategy(
    owner: &str,
    kind: StrategyKind,
    selectors: Option<&SelectorRules>,
) -> Result<(), ConfigError> {
    match (kind, selectors) {
        (StrategyKind::Selectors, None) => Err(ConfigError::Validation(format!(
            "'{}' uses the selectors strategy but defines no selectors",
            owner
        ))),
        (_, Some(rules)) => validate_selector_rules(rules),
        _ => Ok(()),
    }
}

/// Checks that every configured CSS selector parses
pub fn validate_selector_rules(rules: &SelectorRules) -> Result<(), ConfigError> {
    let optional = [&rules.title, &rules.email, &rules.profile, &rules.next];

    std::iter::once(&rules.entry)
        .chain(std::iter::once(&rules.name))
        .chain(optional.into_iter().flatten())
        .try_for_each(|s| parse_selector(s).map(|_| ()))
}

/// Parses a CSS selector, mapping failures to a config error
pub(crate) fn parse_selector(selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector).map_err(|e| ConfigError::InvalidSelector {
        selector: selector.to_string(),
        message: format!("{:?}", e),
    })
}

fn validate_http_url(field: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", field, value, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} '{}' must use http or https",
            field, value
        )));
    }

    Ok(())
}

/// Validates a domain pattern (supports wildcards)
fn validate_domain_pattern(pattern: &str) -> Result<(), ConfigError> {
    if pattern.is_empty() {
        return Err(ConfigError::InvalidPattern(
            "Domain pattern cannot be empty".to_string(),
        ));
    }

    if let Some(domain) = pattern.strip_prefix("*.") {
        validate_domain_string(domain)
    } else {
        validate_domain_string(pattern)
    }
}

/// Validates a domain string (without wildcard prefix)
fn validate_domain_string(domain: &str) -> Result<(), ConfigError> {
    if domain.is_empty() {
        return Err(ConfigError::InvalidPattern(
            "Domain cannot be empty".to_string(),
        ));
    }

    if !domain
        .chars()
        .all(|c| c.is_alphanumeric() || c == '.' || c == '-')
    {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' contains invalid characters",
            domain
        )));
    }

    if domain.starts_with('.')
        || domain.ends_with('.')
        || domain.starts_with('-')
        || domain.ends_with('-')
    {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' cannot start or end with '.' or '-'",
            domain
        )));
    }

    if domain.contains("..") {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' cannot contain consecutive dots",
            domain
        )));
    }

    // localhost is allowed so rules can target test servers
    if !domain.contains('.') && domain != "localhost" {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' must contain at least one dot (e.g., 'example.edu')",
            domain
        )));
    }

    Ok(())
}

/// Basic email validation
fn validate_email(email: &str) -> Result<(), ConfigError> {
    let Some((local, domain)) = email.split_once('@') else {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    };

    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    if !domain.contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid email domain: '{}'",
            email
        )));
    }

    Ok(())
}
