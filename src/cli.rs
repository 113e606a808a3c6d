//! CLI parsing and orchestration. Parses args, resolves settings, runs crawl -> PDF rendering
//! (or a dry-run listing). Maps errors to exit codes.

use crate::config::{self, Settings};
use crate::crawl::{find_chapters, CrawlError, PageClient};
use crate::logging::{self, LogError};
use crate::pipeline::{self, list_chapters, PipelineError};
use crate::render::Wkhtmltopdf;
use clap::Parser;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// CLI error carrying exit code and message.
#[derive(Debug, Error)]
pub enum CliRunError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    Logging(#[from] LogError),

    #[error("{0}")]
    Pipeline(#[from] PipelineError),
}

impl From<CrawlError> for CliRunError {
    fn from(e: CrawlError) -> Self {
        CliRunError::Pipeline(PipelineError::Crawl(e))
    }
}

impl CliRunError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliRunError::InvalidInput(_) | CliRunError::Logging(_) => 1,
            CliRunError::Pipeline(PipelineError::Crawl(_)) => 1,
            CliRunError::Pipeline(PipelineError::Render { .. }) => 2,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "docs2pdf")]
#[command(about = "Crawl a documentation manual's table of contents and render each chapter to PDF")]
#[command(
    after_help = "Config file keys (start_url, domain_prefix, start_at_chapter, output_dir, container_class, user_agent, timeout_secs, converter) are read from ./docs2pdf.toml or the user config dir. CLI flags override config. Log level comes from the LOGLEVEL environment variable (default INFO)."
)]
pub struct Args {
    /// Index page whose table of contents lists the chapters.
    #[arg(long)]
    pub url: Option<String>,

    /// Prefix joined with each relative chapter link to form the page URL.
    #[arg(long)]
    pub domain: Option<String>,

    /// Skip chapters until a generated file name contains this text (e.g. 00042).
    /// Chapter numbers follow the live TOC order, so a reordered site shifts them.
    #[arg(long)]
    pub start_at: Option<String>,

    /// Directory receiving the PDFs. Must already exist. Default: ./chapters
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Class of the element wrapping the table of contents. Default: toctree-wrapper
    #[arg(long)]
    pub container_class: Option<String>,

    /// HTTP User-Agent for the index request (overrides config).
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Index request timeout in seconds (overrides config; default none).
    #[arg(long)]
    pub timeout: Option<u64>,

    /// HTML-to-PDF converter program. Default: wkhtmltopdf
    #[arg(long)]
    pub converter: Option<PathBuf>,

    /// Fetch the TOC and print the chapter list as JSON without rendering.
    #[arg(long)]
    pub dry_run: bool,

    /// Print verbose error chain.
    #[arg(long)]
    pub verbose: bool,
}

/// Lines printed to stderr for a fatal error: the message, then its causes when `verbose`.
/// Printed directly rather than logged so that no `LOGLEVEL` can hide them.
pub fn error_report(e: &CliRunError, verbose: bool) -> Vec<String> {
    use std::error::Error;
    let mut lines = vec![e.to_string()];
    if verbose {
        let mut source = e.source();
        while let Some(s) = source {
            lines.push(format!("  cause: {}", s));
            source = s.source();
        }
    }
    lines
}

/// Install the logger using the level from `LOGLEVEL`.
pub fn init_logging() -> Result<(), CliRunError> {
    let level = logging::level_from_env()?;
    logging::init(level)?;
    Ok(())
}

/// Config-file settings with CLI flags applied on top.
fn resolve_settings(args: &Args, config: Option<&config::Config>) -> Settings {
    let mut s = Settings::from_config(config);
    if let Some(v) = &args.url {
        s.start_url = v.clone();
    }
    if let Some(v) = &args.domain {
        s.domain_prefix = v.clone();
    }
    if let Some(v) = &args.start_at {
        s.resume_marker = v.clone();
    }
    if let Some(v) = &args.output_dir {
        s.output_dir = v.clone();
    }
    if let Some(v) = &args.container_class {
        s.container_class = v.clone();
    }
    if let Some(v) = &args.user_agent {
        s.user_agent = v.clone();
    }
    if args.timeout.is_some() {
        s.timeout_secs = args.timeout;
    }
    if let Some(v) = &args.converter {
        s.converter = v.clone();
    }
    s
}

/// The output directory is never created; fail before crawling when it is missing.
fn validate_output_dir(dir: &Path) -> Result<(), CliRunError> {
    if !dir.is_dir() {
        return Err(CliRunError::InvalidInput(format!(
            "Cannot write chapters: {}: directory does not exist.",
            dir.display()
        )));
    }
    Ok(())
}

/// Entry point for the CLI. Returns Ok(()) on success; Err with exit code and message on failure.
pub fn run(args: &Args) -> Result<(), CliRunError> {
    let config = config::load_config().map_err(CliRunError::InvalidInput)?;
    let settings = resolve_settings(args, config.as_ref());

    let client = PageClient::builder()
        .user_agent(settings.user_agent.clone())
        .timeout_secs(settings.timeout_secs)
        .build()?;

    if args.dry_run {
        let chapters = find_chapters(&client, &settings)?;
        let listing = list_chapters(&chapters, &settings);
        let json = serde_json::to_string_pretty(&listing).map_err(|e| {
            CliRunError::InvalidInput(format!("Failed to write chapter list: {}", e))
        })?;
        println!("{}", json);
        return Ok(());
    }

    validate_output_dir(&settings.output_dir)?;

    let mut renderer = Wkhtmltopdf::new(settings.converter.clone());
    let summary = pipeline::run(&settings, &client, &mut renderer)?;
    info!(
        "Rendered {} chapter(s), skipped {}",
        summary.rendered, summary.skipped
    );
    Ok(())
}
