use crate::models::{BenchmarkScore, RunSummary};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Output format options
#[derive(Debug, Clone, ValueEnum, Serialize, Deserialize)]
pub enum OutputFormat {
    Plain,
    Json,
}

/// Print a run summary in the specified format
pub fn print_results(summary: &RunSummary, format: OutputFormat) {
    match format {
        OutputFormat::Plain => print_plain(summary),
        OutputFormat::Json => print_json(summary),
    }
}

/// Print the summary in plain text format
fn print_plain(summary: &RunSummary) {
    let eval = &summary.evaluation;

    println!("📋 EVALUATION SUMMARY: {}", eval.model_name);
    println!("{}", "=".repeat(44));
    println!("  {:<20} {:.1}%", "Accuracy:", eval.accuracy * 100.0);
    println!(
        "  {:<20} {:.2}s",
        "Avg Response Time:", eval.avg_response_time
    );
    println!(
        "  {:<20} {:.1} tokens/s",
        "Token Efficiency:", eval.token_efficiency
    );
    println!(
        "  {:<20} {:.1}%",
        "Hallucination Rate:",
        eval.hallucination_rate * 100.0
    );
    println!(
        "  {:<20} {:.1}%",
        "Coherence Score:",
        eval.coherence_score * 100.0
    );
    println!("  {:<20} {:.2}/1.00", "Overall Score:", eval.overall_score);
    println!();

    println!("🧪 BENCHMARKS");
    println!("-------------");
    println!("{:<12} {:<8} {:<8}", "Benchmark", "Score", "Correct");
    println!("{}", "-".repeat(30));
    let benchmarks = &summary.benchmarks;
    for (name, score) in [
        ("mmlu", &benchmarks.mmlu),
        ("truthfulqa", &benchmarks.truthfulqa),
        ("hellaswag", &benchmarks.hellaswag),
    ] {
        print_benchmark_row(name, score);
    }
    println!();
    println!(
        "Aggregate benchmark score: {:.1}%",
        benchmarks.aggregate_score * 100.0
    );
}

fn print_benchmark_row(name: &str, score: &BenchmarkScore) {
    println!(
        "{:<12} {:<8} {}/{}",
        name,
        format!("{:.1}%", score.score * 100.0),
        score.correct,
        score.questions_tested
    );
}

/// Print the summary as pretty JSON
fn print_json(summary: &RunSummary) {
    match serde_json::to_string_pretty(summary) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing results to JSON: {}", e),
    }
}
