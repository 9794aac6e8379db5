//! Configuration module for College Leads
//!
//! Two layers live here:
//! - [`JobConfig`]: the per-request job description (JSON)
//! - [`Settings`]: process-level TOML settings (user agent, search surface,
//!   hard limits, college registry, site extraction rules)
//!
//! # Example
//!
//! ```no_run
//! use college_leads::config::load_settings;
//! use std::path::Path;
//!
//! let settings = load_settings(Path::new("settings.toml")).unwrap();
//! println!("Page cap: {}", settings.limits.max_faculty_pages);
//! ```

mod parser;
mod types;
mod validation;

pub use types::{
    CollegeEntry, JobConfig, Limits, SearchConfig, SelectorRules, Settings, SiteEntry,
    StrategyKind, UserAgentConfig,
};

pub use parser::{
    compute_settings_hash, load_settings, load_settings_with_hash, parse_job, parse_settings,
};
pub use validation::{validate_job, validate_selector_rules, validate_settings};

pub(crate) use validation::parse_selector;
