//! Loglens CLI
//!
//! Command-line interface for browsing OTLP log exports.
//!
//! # Usage
//!
//! ```bash
//! loglens --help
//! loglens --source http://localhost:4318 logs --limit 20
//! loglens --source ./export.json logs --expand
//! loglens histogram --interval one_hour
//! loglens health
//! ```

#![deny(unsafe_code)]

mod render;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use shared::histogram::{build_histogram_with_width, HistogramError};
use shared::models::BucketWidth;
use shared::otlp::conversions::otlp_logs_to_views;
use shared::source::{source_for, LogSource};
use std::io::Write;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Loglens CLI - browse OTLP log exports from the terminal
#[derive(Parser)]
#[command(name = "loglens")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Logs API base URL (logs are fetched from `{url}/logs`) or path to an export file
    #[arg(
        short,
        long,
        env = "LOGLENS_SOURCE",
        default_value = "http://localhost:4318"
    )]
    source: String,

    /// Fetch timeout in seconds
    #[arg(short, long, default_value_t = 30)]
    timeout: u64,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List logs, newest first
    Logs {
        /// Maximum number of logs to print
        #[arg(short, long)]
        limit: Option<usize>,

        /// Print the raw record under each row
        #[arg(short, long)]
        expand: bool,
    },
    /// Chart log volume over time
    Histogram {
        /// Bucket width: one_minute, five_minutes, one_hour, one_day
        #[arg(short, long, default_value_t = BucketWidth::OneDay)]
        interval: BucketWidth,
    },
    /// Check that the source can be fetched and decoded
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut out = std::io::stdout().lock();
    run(cli, &mut out).await
}

async fn run(cli: Cli, out: &mut impl Write) -> Result<()> {
    let Some(command) = cli.command else {
        writeln!(out, "Loglens CLI v{}", env!("CARGO_PKG_VERSION"))?;
        writeln!(out, "Use --help for usage information")?;
        return Ok(());
    };

    let source = source_for(&cli.source, Duration::from_secs(cli.timeout))?;

    match command {
        Commands::Logs { limit, expand } => print_logs(source.as_ref(), limit, expand, out).await,
        Commands::Histogram { interval } => print_histogram(source.as_ref(), interval, out).await,
        Commands::Health => check_health(source.as_ref(), out).await,
    }
}

async fn print_logs(
    source: &dyn LogSource,
    limit: Option<usize>,
    expand: bool,
    out: &mut impl Write,
) -> Result<()> {
    let views = otlp_logs_to_views(source.fetch().await?)?;
    tracing::debug!(count = views.len(), "Converted logs");

    for view in views.iter().take(limit.unwrap_or(usize::MAX)) {
        writeln!(out, "{}", render::format_row(view))?;
        if expand {
            writeln!(out, "{}", render::format_raw(view)?)?;
        }
    }
    Ok(())
}

async fn print_histogram(
    source: &dyn LogSource,
    interval: BucketWidth,
    out: &mut impl Write,
) -> Result<()> {
    let views = otlp_logs_to_views(source.fetch().await?)?;

    let bins = match build_histogram_with_width(&views, interval) {
        Ok(bins) => bins,
        Err(HistogramError::EmptyInput) => {
            writeln!(out, "No logs to chart")?;
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    for line in render::format_histogram(&bins) {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

async fn check_health(source: &dyn LogSource, out: &mut impl Write) -> Result<()> {
    let request = source
        .fetch()
        .await
        .with_context(|| format!("Source {} is unhealthy", source.describe()))?;

    writeln!(
        out,
        "Source {} is healthy: {} log records",
        source.describe(),
        request.record_count()
    )?;
    Ok(())
}
