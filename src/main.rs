use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::debug;
use wordtracker::TrackerConfig;
use wordtracker::config::REPOSITORY_ENV;
use wordtracker::store::DEFAULT_REPOSITORY;

#[derive(Parser, Debug)]
#[command(name = "wordtracker")]
#[command(about = "Index the words of a text file by line and report on all indexed files")]
struct Args {
    /// Text file to index
    input: PathBuf,

    /// Report type: -pf (files per word), -pl (lines per word),
    /// -po (occurrences per word). Checked after indexing
    #[arg(value_name = "REPORT", allow_hyphen_values = true)]
    report: String,

    /// Write the report to this file instead of standard output
    #[arg(short = 'f', value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Snapshot file holding the index between runs
    #[arg(long, env = REPOSITORY_ENV, default_value = DEFAULT_REPOSITORY)]
    repository: PathBuf,
}

impl From<Args> for TrackerConfig {
    fn from(args: Args) -> Self {
        let config = TrackerConfig::new(args.input, args.report).with_repository(args.repository);
        match args.output {
            Some(output) => config.with_output(output),
            None => config,
        }
    }
}

fn main() -> Result<()> {
    // Logs go to stderr, reports to stdout
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = TrackerConfig::from(Args::parse());

    let summary = wordtracker::run(&config)
        .with_context(|| format!("Could not process {}", config.input.display()))?;
    debug!(%summary, "Done");

    Ok(())
}
