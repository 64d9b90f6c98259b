use clap::Parser;
use std::path::PathBuf;

mod benchmarks;
mod client;
mod config;
mod error;
mod evaluator;
mod fixtures;
mod models;
mod output;
mod report;
mod runner;

use crate::config::Config;
use crate::output::OutputFormat;
use crate::runner::Runner;

/// Local LLM benchmarking harness - measure latency, throughput, and answer
/// quality against a locally-hosted model
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the TOML run configuration; defaults apply when omitted
    run_file: Option<PathBuf>,

    /// Override the markdown report output path
    #[arg(short, long)]
    report: Option<PathBuf>,

    /// Output format: plain or json
    #[arg(short, long, default_value = "plain")]
    output: OutputFormat,

    /// Verbose output - show progress for each model request
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match &args.run_file {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if let Some(report) = &args.report {
        config.evaluation.report_path = report.display().to_string();
    }

    let runner = Runner::new(config, args.verbose);
    let summary = runner.run().await?;

    output::print_results(&summary, args.output);

    Ok(())
}
