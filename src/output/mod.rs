//! Output module for rendering job results
//!
//! This module handles:
//! - Serializing job results as JSON
//! - Rendering human-readable markdown lead tables
//! - Printing job statistics
//!
//! Nothing here writes files; callers decide where output goes.

mod markdown;
pub mod stats;

pub use markdown::render_markdown;
pub use stats::{print_summary, JobStatistics};

use crate::model::JobResult;

/// Serializes a job result as pretty-printed JSON
///
/// # Returns
///
/// * `Ok(String)` - The JSON document
/// * `Err(serde_json::Error)` - Serialization failed
pub fn render_json(result: &JobResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(result)
}
