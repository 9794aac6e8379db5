use crate::config::types::{JobConfig, Settings};
use crate::config::validation::{validate_job, validate_settings};
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Loads and parses a settings file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML settings file
///
/// # Returns
///
/// * `Ok(Settings)` - Successfully loaded and validated settings
/// * `Err(ConfigError)` - Failed to load, parse, or validate the settings
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use college_leads::config::load_settings;
///
/// let settings = load_settings(Path::new("settings.toml")).unwrap();
/// println!("Known colleges: {}", settings.colleges.len());
/// ```
pub fn load_settings(path: &Path) -> Result<Settings, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_settings(&content)
}

/// Parses and validates settings from TOML text
pub fn parse_settings(content: &str) -> Result<Settings, ConfigError> {
    let settings: Settings = toml::from_str(content)?;
    validate_settings(&settings)?;
    Ok(settings)
}

/// Computes a SHA-256 hash of the settings file content
///
/// Logged at startup so two runs can be tied to the same settings.
pub fn compute_settings_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    Ok(hex::encode(hasher.finalize()))
}

/// Loads settings and returns both the settings and their hash
pub fn load_settings_with_hash(path: &Path) -> Result<(Settings, String), ConfigError> {
    let settings = load_settings(path)?;
    let hash = compute_settings_hash(path)?;
    Ok((settings, hash))
}

/// Parses and validates a JSON job description
///
/// # Example
///
/// ```
/// use college_leads::config::parse_job;
///
/// let job = parse_job(r#"{"college_name": "AIIMS Delhi", "include_linkedin": true}"#).unwrap();
/// assert!(job.include_linkedin);
/// assert_eq!(job.max_faculty_pages, 2);
/// ```
pub fn parse_job(json: &str) -> Result<JobConfig, ConfigError> {
    let job: JobConfig = serde_json::from_str(json)?;
    validate_job(&job)?;
    Ok(job)
}
