//! College Leads main entry point
//!
//! This is the command-line interface for the College Leads faculty scraper.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use college_leads::config::{load_settings_with_hash, parse_job, JobConfig, Settings};
use college_leads::output::{print_summary, render_json, render_markdown};
use college_leads::{health, Coordinator};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// College Leads: a bounded faculty-listing scraper
///
/// College Leads crawls a college's public faculty listing pages, extracts
/// contact records, and optionally looks up professional profiles. Every job
/// runs under explicit page, entry, delay and timeout bounds.
#[derive(Parser, Debug)]
#[command(name = "college-leads")]
#[command(version)]
#[command(about = "A bounded faculty-listing scraper", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scrape one college
    Scrape {
        /// College name, registry alias, or listing URL
        #[arg(value_name = "COLLEGE")]
        college: String,

        /// Maximum listing pages to visit
        #[arg(long, default_value_t = 2)]
        max_pages: u32,

        /// Maximum entries kept per listing page
        #[arg(long, default_value_t = 8)]
        per_page: u32,

        /// Look up LinkedIn profiles for each record
        #[arg(long)]
        linkedin: bool,

        /// Minimum seconds between requests
        #[arg(long, default_value_t = 0.0)]
        delay: f64,

        /// Per-request timeout in seconds
        #[arg(long, default_value_t = 10.0)]
        timeout: f64,

        #[command(flatten)]
        run: RunArgs,
    },

    /// Run a job from a JSON job description (`-` reads stdin)
    Job {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[command(flatten)]
        run: RunArgs,
    },

    /// Print the liveness payload
    Health,

    /// Validate a settings file and show what it configures
    CheckSettings {
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },
}

#[derive(clap::Args, Debug)]
struct RunArgs {
    /// Path to TOML settings file
    #[arg(long, value_name = "PATH")]
    settings: Option<PathBuf>,

    /// Output format written to stdout
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Json,
    Markdown,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    match cli.command {
        Command::Scrape {
            college,
            max_pages,
            per_page,
            linkedin,
            delay,
            timeout,
            run,
        } => {
            let job = JobConfig {
                college_name: college,
                max_faculty_pages: max_pages,
                max_faculty_per_page: per_page,
                include_linkedin: linkedin,
                polite_delay_s: delay,
                request_timeout_s: timeout,
            };
            handle_job(job, &run, cli.quiet).await
        }
        Command::Job { file, run } => {
            let job = read_job(&file)?;
            handle_job(job, &run, cli.quiet).await
        }
        Command::Health => {
            println!("{}", serde_json::to_string(&health())?);
            Ok(())
        }
        Command::CheckSettings { path } => handle_check_settings(&path),
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so stdout carries only the rendered result.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("college_leads=info,warn"),
            1 => EnvFilter::new("college_leads=debug,info"),
            2 => EnvFilter::new("college_leads=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    let Some(path) = path else {
        tracing::debug!("No settings file given, using defaults");
        return Ok(Settings::default());
    };

    tracing::info!("Loading settings from: {}", path.display());
    let (settings, hash) = load_settings_with_hash(path)
        .with_context(|| format!("Failed to load settings from {}", path.display()))?;
    tracing::info!("Settings loaded successfully (hash: {})", hash);
    Ok(settings)
}

fn read_job(path: &Path) -> anyhow::Result<JobConfig> {
    let content = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read job from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read job file {}", path.display()))?
    };

    Ok(parse_job(&content)?)
}

/// Runs one job and writes the result to stdout
async fn handle_job(job: JobConfig, run: &RunArgs, quiet: bool) -> anyhow::Result<()> {
    let settings = load_settings(run.settings.as_deref())?;
    let coordinator = Coordinator::new(settings)?;

    let result = coordinator.run(job).await?;

    let rendered = match run.format {
        Format::Json => render_json(&result)?,
        Format::Markdown => render_markdown(&result),
    };
    println!("{}", rendered);

    if !quiet {
        print_summary(&result);
    }

    Ok(())
}

/// Handles `check-settings`: validates settings and shows what they configure
fn handle_check_settings(path: &Path) -> anyhow::Result<()> {
    let (settings, hash) = match load_settings_with_hash(path) {
        Ok(loaded) => loaded,
        Err(e) => bail!("Invalid settings in {}: {}", path.display(), e),
    };

    println!("=== College Leads Settings ===\n");
    println!("File: {}", path.display());
    println!("Hash: {}", hash);

    println!("\nUser Agent:");
    println!("  {}", settings.user_agent.header_value());

    println!("\nSearch:");
    println!("  Endpoint: {}", settings.search.endpoint);
    println!("  Website discovery: {}", settings.search.discover_websites);
    println!("  Max profile candidates: {}", settings.search.max_candidates);

    let limits = &settings.limits;
    println!("\nLimits:");
    println!("  Max pages: {}", limits.max_faculty_pages);
    println!("  Max per page: {}", limits.max_faculty_per_page);
    println!(
        "  With LinkedIn: {} pages, {} per page",
        limits.linkedin_max_faculty_pages, limits.linkedin_max_faculty_per_page
    );
    println!("  Max request timeout: {}s", limits.max_request_timeout_s);
    println!("  Max polite delay: {}s", limits.max_polite_delay_s);

    println!("\nColleges ({}):", settings.colleges.len());
    for college in &settings.colleges {
        println!("  - {} -> {}", college.name, college.listing_url);
        for alias in &college.aliases {
            println!("    * alias: {}", alias);
        }
    }

    println!("\nSite Rules ({}):", settings.sites.len());
    for site in &settings.sites {
        println!("  - {} ({:?})", site.domain, site.strategy);
    }

    Ok(())
}
