//! Markdown rendering
//!
//! This module renders a job result as a human-readable lead sheet:
//! job information, counters, college contacts, and a table of records.

use crate::model::{JobResult, JobStatus};

/// Formats a job result as markdown
///
/// # Arguments
///
/// * `result` - The finished job
///
/// # Returns
///
/// A formatted markdown string
pub fn render_markdown(result: &JobResult) -> String {
    let mut md = String::new();

    md.push_str(&format!("# Faculty Leads: {}\n\n", escape(&result.college_name)));

    // Job metadata
    md.push_str("## Job Information\n\n");
    md.push_str(&format!("- **Started**: {}\n", result.started_at.to_rfc3339()));
    md.push_str(&format!("- **Finished**: {}\n", result.finished_at.to_rfc3339()));
    let status = match result.status {
        JobStatus::Completed => "completed",
        JobStatus::TargetUnresolved => "target unresolved",
    };
    md.push_str(&format!("- **Status**: {}\n", status));
    if let Some(website) = &result.college_website {
        md.push_str(&format!("- **Website**: {}\n", website));
    }
    if let Some(start) = &result.start_url {
        md.push_str(&format!("- **Listing**: {}\n", start));
    }
    if let Some(termination) = result.termination {
        md.push_str(&format!("- **Stopped**: {}\n", termination));
    }
    md.push('\n');

    // Counters
    md.push_str("## Statistics\n\n");
    md.push_str("| Counter | Value |\n");
    md.push_str("|---------|-------|\n");
    md.push_str(&format!("| Records | {} |\n", result.records.len()));
    md.push_str(&format!("| Pages Visited | {} |\n", result.pages_visited));
    md.push_str(&format!("| Pages Failed | {} |\n", result.pages_failed));
    md.push_str(&format!("| Entries Dropped | {} |\n", result.entries_dropped));
    md.push_str(&format!(
        "| Enrichment Failures | {} |\n\n",
        result.enrichment_failures
    ));

    let contacts = &result.college_contacts;
    if !contacts.emails.is_empty() || !contacts.phones.is_empty() {
        md.push_str("## College Contacts\n\n");
        for email in &contacts.emails {
            md.push_str(&format!("- Email: {}\n", email));
        }
        for phone in &contacts.phones {
            md.push_str(&format!("- Phone: {}\n", phone));
        }
        md.push('\n');
    }

    md.push_str("## Faculty\n\n");
    if result.records.is_empty() {
        md.push_str("No faculty records found.\n");
        return md;
    }

    md.push_str("| # | Name | Title | Email | Phone | Profile | LinkedIn |\n");
    md.push_str("|---|------|-------|-------|-------|---------|----------|\n");
    for (i, record) in result.records.iter().enumerate() {
        let stub = &record.stub;
        md.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} | {} |\n",
            i + 1,
            escape(&stub.name),
            cell(&stub.title),
            cell(&stub.email),
            cell(&stub.phone),
            cell(&stub.profile_url),
            cell(&record.linkedin_url),
        ));
    }

    md
}

fn cell(value: &Option<String>) -> String {
    value.as_deref().map(escape).unwrap_or_default()
}

/// Escapes characters that would break a table row
fn escape(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}
