use std::path::PathBuf;

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::Parser;
use issuegraph::{ArtifactWriter, AttributeFilter, IssueGraph, LogProgress, loader};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "issuegraph")]
#[command(about = "Counts open and closed issues per day and writes chart documents")]
struct Args {
    /// JSON array of issue objects (e.g. a GitHub issues dump)
    #[arg(short, long)]
    input: PathBuf,

    /// Directory the chart documents are written to
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Instant used as "now" for still-open issues (RFC 3339, defaults to the current time)
    #[arg(long)]
    as_of: Option<DateTime<Utc>>,

    /// IANA timezone used to split days (defaults to each timestamp's own wall clock)
    #[arg(long)]
    timezone: Option<String>,

    /// Extra series counting issues whose attribute equals a value, e.g. `state_reason=completed`
    #[arg(long = "where", value_name = "KEY=VALUE")]
    filters: Vec<AttributeFilter>,

    /// Compute the first and last day like any other day instead of stabbing the index
    #[arg(long)]
    no_seed: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

fn init_logging(quiet: bool) {
    let default = if quiet { "warn" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.quiet);

    let records = loader::load_records(&args.input)
        .with_context(|| format!("failed to load issues from {}", args.input.display()))?;
    info!(records = records.len(), input = %args.input.display(), "loaded issues");

    let mut builder = IssueGraph::builder()
        .records(records)
        .seed_boundaries(!args.no_seed);
    if let Some(at) = args.as_of {
        builder = builder.as_of(at);
    }
    if let Some(tz) = args.timezone {
        builder = builder.timezone(tz);
    }
    for filter in args.filters {
        builder = builder.filter(filter);
    }
    let graph = builder.build().context("invalid settings")?;

    let mut progress = LogProgress::new();
    let report = graph
        .compute_observed(&mut progress)
        .context("failed to compute issue timeline")?;

    let written = ArtifactWriter::new(&args.output_dir)
        .write_report(&report)
        .with_context(|| format!("failed to write charts to {}", args.output_dir.display()))?;
    for path in &written {
        println!("{}", path.display());
    }
    info!(
        artifacts = written.len(),
        output_dir = %args.output_dir.display(),
        "charts written"
    );
    Ok(())
}
