use crate::benchmarks::BenchmarkRunner;
use crate::client::OpenAiChatClient;
use crate::config::Config;
use crate::evaluator::Evaluator;
use crate::fixtures::FixtureSet;
use crate::models::RunSummary;
use crate::report;
use anyhow::{Context, Result};
use std::path::Path;

/// Orchestrates one full run: endpoint probe, metric evaluation, benchmark
/// sweep, report
pub struct Runner {
    config: Config,
    verbose: bool,
}

impl Runner {
    /// Create a new runner with the given configuration
    pub fn new(config: Config, verbose: bool) -> Self {
        Self { config, verbose }
    }

    /// Run the whole pipeline against the configured model.
    ///
    /// The report is written last, so a failed run never leaves a partial
    /// report file behind.
    pub async fn run(&self) -> Result<RunSummary> {
        let client = OpenAiChatClient::from_config(&self.config.model)?;

        if self.verbose {
            println!("Probing endpoint {}", self.config.model.api_endpoint);
        }
        client.probe_endpoint().await?;

        let fixtures = FixtureSet::builtin();
        let evaluator = Evaluator::new(
            &client,
            fixtures,
            self.config.evaluation.performance_samples,
            self.verbose,
        );
        let evaluation = evaluator
            .evaluate_all()
            .await
            .context("Evaluation run failed")?;

        let benchmark_runner = BenchmarkRunner::new(&client, fixtures, self.verbose);
        let benchmarks = benchmark_runner
            .run_all_benchmarks()
            .await
            .context("Benchmark run failed")?;

        let summary = RunSummary {
            evaluation,
            benchmarks,
        };

        let report_path = &self.config.evaluation.report_path;
        report::write_report(&summary.evaluation, Path::new(report_path))?;
        println!("Report saved to: {}", report_path);

        Ok(summary)
    }
}
