mod discover;
mod scrape;

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use venuescout_core::{AppConfig, Report};

#[derive(Debug, Parser)]
#[command(name = "venuescout")]
#[command(about = "Find Minnesota venues hosting live music and write them to a JSON report")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Discover venues through the places-search API
    Discover(RunArgs),
    /// Scrape phone numbers for the venues listed in the config file
    Scrape(RunArgs),
    /// Re-scrape phone numbers for the venues already in the report
    Refresh(RunArgs),
}

#[derive(Debug, Args)]
struct RunArgs {
    /// Report path (defaults to `VENUESCOUT_OUTPUT_PATH`)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Print the report to stdout instead of writing it
    #[arg(long)]
    dry_run: bool,
}

impl RunArgs {
    fn output_path<'a>(&'a self, config: &'a AppConfig) -> &'a Path {
        self.output.as_deref().unwrap_or(config.output_path.as_path())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = venuescout_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(?config, "configuration loaded");

    match cli.command {
        Commands::Discover(args) => discover::run_discover(&config, &args).await,
        Commands::Scrape(args) => scrape::run_scrape(&config, &args).await,
        Commands::Refresh(args) => scrape::run_refresh(&config, &args).await,
    }
}

/// Write `report` to `path`, or print it to `out` when `dry_run` is set.
///
/// A dry run writes nothing to `out` except the report JSON, so the output
/// can be piped straight into another tool.
pub(crate) fn emit_report(
    report: &Report,
    path: &Path,
    dry_run: bool,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    if dry_run {
        serde_json::to_writer_pretty(&mut *out, report)?;
        writeln!(out)?;
        tracing::info!(
            path = %path.display(),
            events = report.events.len(),
            "dry run: report not written"
        );
        return Ok(());
    }

    venuescout_core::write_report(path, report)
        .with_context(|| format!("failed to write report to {}", path.display()))?;
    tracing::info!(path = %path.display(), events = report.events.len(), "report written");
    Ok(())
}

/// Print the one-line run summary.
///
/// On a dry run stdout carries the report, so the summary is logged instead.
pub(crate) fn print_summary(dry_run: bool, summary: &str) {
    if dry_run {
        tracing::info!("{summary}");
    } else {
        println!("{summary}");
    }
}
