use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Performance metrics from timing a fixed set of prompts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    /// Average response time in seconds
    pub avg_response_time: f64,
    /// Fastest single response in seconds
    pub min_response_time: f64,
    /// Slowest single response in seconds
    pub max_response_time: f64,
    /// Average estimated tokens per response
    pub avg_tokens_per_response: f64,
    /// Estimated tokens per second across the whole run
    pub tokens_per_second: f64,
    /// Number of prompts issued
    pub samples: usize,
}

impl PerformanceMetrics {
    /// Flatten into a sorted name/value map for the detailed report dump
    pub fn as_map(&self) -> BTreeMap<String, f64> {
        BTreeMap::from([
            ("avg_response_time".to_string(), self.avg_response_time),
            ("min_response_time".to_string(), self.min_response_time),
            ("max_response_time".to_string(), self.max_response_time),
            (
                "avg_tokens_per_response".to_string(),
                self.avg_tokens_per_response,
            ),
            ("tokens_per_second".to_string(), self.tokens_per_second),
        ])
    }
}

/// Quality metrics from scoring responses against fixed heuristics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityMetrics {
    /// Fraction of test questions answered correctly (0.0 to 1.0)
    pub accuracy: f64,
    /// Fraction of responses passing the coherence heuristic (0.0 to 1.0)
    pub coherence_score: f64,
    /// Fraction of uncertainty probes answered without hedging (0.0 to 1.0)
    pub hallucination_rate: f64,
    /// Number of question/answer pairs tested
    pub questions_tested: usize,
    /// Number answered correctly
    pub correct: usize,
    /// Number of responses judged coherent
    pub coherent: usize,
    /// Number of uncertainty probes issued
    pub probes: usize,
    /// Number of probes where the model failed to express uncertainty
    pub hallucinations: usize,
}

impl QualityMetrics {
    /// Flatten into a sorted name/value map for the detailed report dump
    pub fn as_map(&self) -> BTreeMap<String, f64> {
        BTreeMap::from([
            ("accuracy".to_string(), self.accuracy),
            ("coherence_score".to_string(), self.coherence_score),
            ("hallucination_rate".to_string(), self.hallucination_rate),
        ])
    }
}

/// Complete result of one evaluation run for a single model.
///
/// Built once per run and immutable afterwards; the caller decides whether
/// to print it, serialize it, or render it into a report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// Model identifier the run was executed against
    pub model_name: String,
    /// Fraction of test questions answered correctly (0.0 to 1.0)
    pub accuracy: f64,
    /// Average response time in seconds
    pub avg_response_time: f64,
    /// Estimated tokens per second
    pub token_efficiency: f64,
    /// Fraction of uncertainty probes answered without hedging (0.0 to 1.0)
    pub hallucination_rate: f64,
    /// Fraction of responses passing the coherence heuristic (0.0 to 1.0)
    pub coherence_score: f64,
    /// Weighted combination of the sub-scores (0.0 to 1.0)
    pub overall_score: f64,
    /// Raw sub-metric maps keyed by section name, sorted so report output
    /// is deterministic
    pub detailed_metrics: BTreeMap<String, BTreeMap<String, f64>>,
}

/// Score for a single sampled benchmark
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkScore {
    /// Fraction of questions scored correct (0.0 to 1.0)
    pub score: f64,
    /// Number of questions issued
    pub questions_tested: usize,
    /// Number scored correct
    pub correct: usize,
}

/// Results from running all sampled benchmarks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkReport {
    pub mmlu: BenchmarkScore,
    pub truthfulqa: BenchmarkScore,
    pub hellaswag: BenchmarkScore,
    /// Unweighted arithmetic mean of the three benchmark scores
    pub aggregate_score: f64,
}

/// Everything one run produces: the metric evaluation plus the benchmark
/// sweep
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub evaluation: EvaluationResult,
    pub benchmarks: BenchmarkReport,
}
