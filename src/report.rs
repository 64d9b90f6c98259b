use crate::models::EvaluationResult;
use anyhow::{Context, Result};
use std::path::Path;

/// Render an evaluation result into the fixed markdown report template.
///
/// The template carries no timestamps, so rendering the same result twice
/// produces byte-identical output.
pub fn render(result: &EvaluationResult) -> String {
    let mut report = format!(
        "# Evaluation Report: {}\n\
         \n\
         ## Summary\n\
         \n\
         | Metric | Value |\n\
         |--------|-------|\n\
         | Accuracy | {:.1}% |\n\
         | Avg Response Time | {:.2}s |\n\
         | Token Efficiency | {:.1} tokens/s |\n\
         | Hallucination Rate | {:.1}% |\n\
         | Coherence Score | {:.1}% |\n\
         | **Overall Score** | **{:.2}/1.00** |\n",
        result.model_name,
        result.accuracy * 100.0,
        result.avg_response_time,
        result.token_efficiency,
        result.hallucination_rate * 100.0,
        result.coherence_score * 100.0,
        result.overall_score,
    );

    for (section, metrics) in &result.detailed_metrics {
        report.push_str(&format!("\n## {} Details\n\n```\n", capitalize(section)));
        for (name, value) in metrics {
            report.push_str(&format!("{}: {:.4}\n", name, value));
        }
        report.push_str("```\n");
    }

    report.push_str("\n---\nGenerated by llm-evaluator v0.1.0\n");
    report
}

/// Render a result and write it to the given path, creating parent
/// directories as needed
pub fn write_report(result: &EvaluationResult, path: &Path) -> Result<()> {
    let report = render(result);

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(path, report)
        .with_context(|| format!("Failed to write report to: {}", path.display()))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
