use crate::client::ChatClient;
use crate::error::EvalError;
use crate::fixtures::{FixtureSet, QaPair};
use crate::models::{EvaluationResult, PerformanceMetrics, QualityMetrics};
use std::collections::BTreeMap;

/// Weight of the speed sub-score in the overall score
pub const SPEED_WEIGHT: f64 = 0.2;
/// Weight of the accuracy sub-score in the overall score
pub const ACCURACY_WEIGHT: f64 = 0.3;
/// Weight of the coherence sub-score in the overall score
pub const COHERENCE_WEIGHT: f64 = 0.2;
/// Weight of the anti-hallucination sub-score in the overall score
pub const ANTI_HALLUCINATION_WEIGHT: f64 = 0.3;

/// Speed score is SPEED_NUMERATOR / avg response time, clamped to [0, 1],
/// with the average floored at MIN_AVG_RESPONSE_TIME seconds
const SPEED_NUMERATOR: f64 = 2.0;
const MIN_AVG_RESPONSE_TIME: f64 = 0.1;

/// Rough token estimate: 4 characters per token. An approximation, not a
/// real tokenizer.
const CHARS_PER_TOKEN: f64 = 4.0;

/// Responses at or below this length fail the coherence heuristic
const MIN_COHERENT_CHARS: usize = 10;
/// Responses with more sentence terminators than this are considered
/// degenerately fragmented
const MAX_SENTENCE_TERMINATORS: usize = 10;

fn estimate_tokens(text: &str) -> f64 {
    text.chars().count() as f64 / CHARS_PER_TOKEN
}

/// Length/punctuation proxy for well-formed output, not a semantic measure
fn is_coherent(response: &str) -> bool {
    response.chars().count() > MIN_COHERENT_CHARS
        && !response.starts_with("Error")
        && response.matches('.').count() <= MAX_SENTENCE_TERMINATORS
}

/// Whether the response contains any of the given uncertainty markers,
/// case-insensitively
pub(crate) fn expresses_uncertainty(response: &str, markers: &[&str]) -> bool {
    let lower = response.to_lowercase();
    markers.iter().any(|marker| lower.contains(marker))
}

/// Drives the chat adapter through fixed prompt tables and folds the raw
/// responses and timings into latency, throughput, and quality scores.
///
/// Prompts are issued strictly sequentially in table order. One failed call
/// fails the whole run.
pub struct Evaluator<C: ChatClient> {
    client: C,
    fixtures: FixtureSet,
    performance_samples: usize,
    verbose: bool,
}

impl<C: ChatClient> Evaluator<C> {
    pub fn new(client: C, fixtures: FixtureSet, performance_samples: usize, verbose: bool) -> Self {
        Self {
            client,
            fixtures,
            performance_samples,
            verbose,
        }
    }

    /// Time a prefix of the performance prompt table and aggregate simple
    /// latency and throughput statistics
    pub async fn measure_performance(
        &self,
        num_samples: usize,
    ) -> Result<PerformanceMetrics, EvalError> {
        if num_samples == 0 {
            return Err(EvalError::EmptySampleSet("performance prompts"));
        }
        let available = self.fixtures.performance_prompts.len();
        if num_samples > available {
            return Err(EvalError::InsufficientFixtures {
                requested: num_samples,
                available,
            });
        }

        let prompts = &self.fixtures.performance_prompts[..num_samples];
        let mut response_times = Vec::with_capacity(num_samples);
        let mut token_counts = Vec::with_capacity(num_samples);

        for (i, prompt) in prompts.iter().enumerate() {
            self.log_progress("performance prompt", i + 1, num_samples);
            let outcome = self.client.chat(prompt).await?;
            response_times.push(outcome.elapsed.as_secs_f64());
            token_counts.push(estimate_tokens(&outcome.content));
        }

        let total_time: f64 = response_times.iter().sum();
        if total_time <= 0.0 {
            return Err(EvalError::ZeroElapsedTime);
        }
        let total_tokens: f64 = token_counts.iter().sum();
        let count = num_samples as f64;

        Ok(PerformanceMetrics {
            avg_response_time: total_time / count,
            min_response_time: response_times.iter().copied().fold(f64::INFINITY, f64::min),
            max_response_time: response_times.iter().copied().fold(0.0, f64::max),
            avg_tokens_per_response: total_tokens / count,
            tokens_per_second: total_tokens / total_time,
            samples: num_samples,
        })
    }

    /// Score accuracy, coherence, and hallucination over fixed test sets.
    ///
    /// Accuracy is case-insensitive substring containment of the expected
    /// answer. A probe response counts as a hallucination when it contains
    /// none of the uncertainty markers.
    pub async fn measure_quality(
        &self,
        test_set: Option<&[QaPair]>,
    ) -> Result<QualityMetrics, EvalError> {
        let test_set = test_set.unwrap_or(self.fixtures.qa_pairs);
        if test_set.is_empty() {
            return Err(EvalError::EmptySampleSet("quality test set"));
        }
        let probes = self.fixtures.hallucination_probes;
        if probes.is_empty() {
            return Err(EvalError::EmptySampleSet("hallucination probes"));
        }

        let mut correct = 0;
        let mut coherent = 0;
        for (i, pair) in test_set.iter().enumerate() {
            self.log_progress("quality prompt", i + 1, test_set.len());
            let outcome = self.client.chat(pair.prompt).await?;

            if outcome
                .content
                .to_lowercase()
                .contains(&pair.expected.to_lowercase())
            {
                correct += 1;
            }
            if is_coherent(&outcome.content) {
                coherent += 1;
            }
        }

        let mut hallucinations = 0;
        for (i, probe) in probes.iter().enumerate() {
            self.log_progress("hallucination probe", i + 1, probes.len());
            let outcome = self.client.chat(probe).await?;
            if !expresses_uncertainty(&outcome.content, self.fixtures.uncertainty_markers) {
                hallucinations += 1;
            }
        }

        Ok(QualityMetrics {
            accuracy: correct as f64 / test_set.len() as f64,
            coherence_score: coherent as f64 / test_set.len() as f64,
            hallucination_rate: hallucinations as f64 / probes.len() as f64,
            questions_tested: test_set.len(),
            correct,
            coherent,
            probes: probes.len(),
            hallucinations,
        })
    }

    /// Run performance and quality measurement and fold them into one
    /// result with a fixed-weight overall score
    pub async fn evaluate_all(&self) -> Result<EvaluationResult, EvalError> {
        if self.verbose {
            println!("Measuring performance for {}", self.client.model());
        }
        let performance = self.measure_performance(self.performance_samples).await?;

        if self.verbose {
            println!("Measuring quality for {}", self.client.model());
        }
        let quality = self.measure_quality(None).await?;

        let overall_score = overall_score(&performance, &quality);

        let mut detailed_metrics = BTreeMap::new();
        detailed_metrics.insert("performance".to_string(), performance.as_map());
        detailed_metrics.insert("quality".to_string(), quality.as_map());

        Ok(EvaluationResult {
            model_name: self.client.model().to_string(),
            accuracy: quality.accuracy,
            avg_response_time: performance.avg_response_time,
            token_efficiency: performance.tokens_per_second,
            hallucination_rate: quality.hallucination_rate,
            coherence_score: quality.coherence_score,
            overall_score,
            detailed_metrics,
        })
    }

    fn log_progress(&self, kind: &str, current: usize, total: usize) {
        if self.verbose {
            println!("  → {} {}/{}", kind, current, total);
        }
    }
}

/// The fixed-weight overall score formula. Faster average responses score
/// higher, capped at 1.0.
pub fn overall_score(performance: &PerformanceMetrics, quality: &QualityMetrics) -> f64 {
    let speed_score = (SPEED_NUMERATOR
        / performance.avg_response_time.max(MIN_AVG_RESPONSE_TIME))
    .clamp(0.0, 1.0);

    speed_score * SPEED_WEIGHT
        + quality.accuracy * ACCURACY_WEIGHT
        + quality.coherence_score * COHERENCE_WEIGHT
        + (1.0 - quality.hallucination_rate) * ANTI_HALLUCINATION_WEIGHT
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ChatOutcome;
    use std::time::Duration;

    /// Fake adapter: answers from a substring-keyed script, falling back to
    /// a fixed response, always with the same elapsed time
    struct CannedClient {
        script: Vec<(&'static str, &'static str)>,
        fallback: &'static str,
        elapsed: Duration,
    }

    impl CannedClient {
        fn new(script: Vec<(&'static str, &'static str)>, fallback: &'static str) -> Self {
            Self {
                script,
                fallback,
                elapsed: Duration::from_millis(500),
            }
        }

        fn with_elapsed(mut self, elapsed: Duration) -> Self {
            self.elapsed = elapsed;
            self
        }
    }

    impl ChatClient for CannedClient {
        fn model(&self) -> &str {
            "canned-model"
        }

        async fn chat(&self, prompt: &str) -> Result<ChatOutcome, EvalError> {
            let content = self
                .script
                .iter()
                .find(|(key, _)| prompt.contains(key))
                .map(|(_, response)| *response)
                .unwrap_or(self.fallback);

            Ok(ChatOutcome {
                content: content.to_string(),
                elapsed: self.elapsed,
            })
        }
    }

    struct FailingClient;

    impl ChatClient for FailingClient {
        fn model(&self) -> &str {
            "failing-model"
        }

        async fn chat(&self, _prompt: &str) -> Result<ChatOutcome, EvalError> {
            Err(EvalError::Inference("connection reset".to_string()))
        }
    }

    fn evaluator_with(client: CannedClient) -> Evaluator<CannedClient> {
        Evaluator::new(client, FixtureSet::builtin(), 10, false)
    }

    #[tokio::test]
    async fn test_measure_performance_zero_samples() {
        let evaluator = evaluator_with(CannedClient::new(vec![], "whatever response."));
        let err = evaluator.measure_performance(0).await.unwrap_err();
        assert!(matches!(err, EvalError::EmptySampleSet(_)));
    }

    #[tokio::test]
    async fn test_measure_performance_too_many_samples() {
        let evaluator = evaluator_with(CannedClient::new(vec![], "whatever response."));
        let err = evaluator.measure_performance(11).await.unwrap_err();
        assert!(matches!(
            err,
            EvalError::InsufficientFixtures {
                requested: 11,
                available: 10
            }
        ));
    }

    #[tokio::test]
    async fn test_measure_performance_statistics() {
        // 40 chars -> 10 estimated tokens per response
        let response = "0123456789012345678901234567890123456789";
        let client = CannedClient::new(vec![], response);
        let evaluator = evaluator_with(client);

        let metrics = evaluator.measure_performance(4).await.unwrap();
        assert_eq!(metrics.samples, 4);
        assert!((metrics.avg_response_time - 0.5).abs() < 1e-9);
        assert!((metrics.min_response_time - 0.5).abs() < 1e-9);
        assert!((metrics.max_response_time - 0.5).abs() < 1e-9);
        assert!((metrics.avg_tokens_per_response - 10.0).abs() < 1e-9);
        // 40 tokens over 2 seconds total
        assert!((metrics.tokens_per_second - 20.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_measure_performance_zero_elapsed_is_an_error() {
        let client =
            CannedClient::new(vec![], "some response.").with_elapsed(Duration::ZERO);
        let evaluator = evaluator_with(client);

        let err = evaluator.measure_performance(3).await.unwrap_err();
        assert!(matches!(err, EvalError::ZeroElapsedTime));
    }

    #[tokio::test]
    async fn test_measure_performance_propagates_adapter_failure() {
        let evaluator = Evaluator::new(FailingClient, FixtureSet::builtin(), 10, false);
        let err = evaluator.measure_performance(5).await.unwrap_err();
        assert!(matches!(err, EvalError::Inference(_)));
    }

    #[tokio::test]
    async fn test_measure_quality_counts_correct_answer() {
        let client = CannedClient::new(
            vec![(
                "capital of France",
                "Paris is the capital of France.",
            )],
            "I'm not sure about that one.",
        );
        let evaluator = evaluator_with(client);

        let pairs = &[QaPair {
            prompt: "What is the capital of France?",
            expected: "Paris",
        }];
        let metrics = evaluator.measure_quality(Some(pairs)).await.unwrap();

        assert_eq!(metrics.questions_tested, 1);
        assert_eq!(metrics.correct, 1);
        assert!((metrics.accuracy - 1.0).abs() < 1e-9);
        // Probe responses hedge ("not sure"), so no hallucinations
        assert_eq!(metrics.hallucinations, 0);
        assert!((metrics.hallucination_rate - 0.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_measure_quality_flags_confident_probe_answers() {
        let client = CannedClient::new(
            vec![],
            "The answer is definitely the Lions, in the capital city of Poseidonia.",
        );
        let evaluator = evaluator_with(client);

        let metrics = evaluator.measure_quality(None).await.unwrap();
        assert_eq!(metrics.probes, 2);
        assert_eq!(metrics.hallucinations, 2);
        assert!((metrics.hallucination_rate - 1.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_measure_quality_empty_test_set() {
        let evaluator = evaluator_with(CannedClient::new(vec![], "whatever response."));
        let err = evaluator.measure_quality(Some(&[])).await.unwrap_err();
        assert!(matches!(err, EvalError::EmptySampleSet(_)));
    }

    #[tokio::test]
    async fn test_evaluate_all_scores_in_bounds_and_formula_exact() {
        // Correct, hedging, coherent answers for every builtin fixture
        let client = CannedClient::new(
            vec![
                ("5+3", "The answer is 8, of course."),
                ("capital of Japan", "Tokyo is the capital of Japan."),
                ("continents", "There are 7 continents on Earth."),
                ("World War 2", "World War 2 ended in 1945."),
                ("H2O", "H2O is the chemical formula for water."),
                ("2025 World Cup", "I'm not sure; that hasn't been decided yet."),
                ("Atlantis", "I cannot say; Atlantis is a fictional place."),
            ],
            "A reasonably long generic response.",
        )
        .with_elapsed(Duration::from_secs(4));
        let evaluator = evaluator_with(client);

        let result = evaluator.evaluate_all().await.unwrap();

        assert_eq!(result.model_name, "canned-model");
        for value in [
            result.accuracy,
            result.coherence_score,
            result.hallucination_rate,
            result.overall_score,
        ] {
            assert!((0.0..=1.0).contains(&value));
        }

        // avg 4.0s -> speed score 2.0 / 4.0 = 0.5; everything else perfect
        assert!((result.accuracy - 1.0).abs() < 1e-9);
        assert!((result.coherence_score - 1.0).abs() < 1e-9);
        assert!((result.hallucination_rate - 0.0).abs() < 1e-9);
        let expected = 0.5 * SPEED_WEIGHT
            + 1.0 * ACCURACY_WEIGHT
            + 1.0 * COHERENCE_WEIGHT
            + 1.0 * ANTI_HALLUCINATION_WEIGHT;
        assert!((result.overall_score - expected).abs() < 1e-9);

        assert!(result.detailed_metrics.contains_key("performance"));
        assert!(result.detailed_metrics.contains_key("quality"));
    }

    #[test]
    fn test_overall_score_formula() {
        let performance = PerformanceMetrics {
            avg_response_time: 0.05, // floored at 0.1 -> speed capped at 1.0
            min_response_time: 0.05,
            max_response_time: 0.05,
            avg_tokens_per_response: 10.0,
            tokens_per_second: 200.0,
            samples: 10,
        };
        let quality = QualityMetrics {
            accuracy: 0.6,
            coherence_score: 0.8,
            hallucination_rate: 0.5,
            questions_tested: 5,
            correct: 3,
            coherent: 4,
            probes: 2,
            hallucinations: 1,
        };

        let score = overall_score(&performance, &quality);
        let expected = 1.0 * SPEED_WEIGHT
            + 0.6 * ACCURACY_WEIGHT
            + 0.8 * COHERENCE_WEIGHT
            + 0.5 * ANTI_HALLUCINATION_WEIGHT;
        assert!((score - expected).abs() < 1e-9);
    }

    #[test]
    fn test_coherence_heuristic() {
        assert!(is_coherent("A perfectly normal sentence about Rust."));
        // Too short
        assert!(!is_coherent("Nope."));
        // Error marker
        assert!(!is_coherent("Error: model not loaded properly"));
        // Degenerate repetition
        assert!(!is_coherent("yes. yes. yes. yes. yes. yes. yes. yes. yes. yes. yes."));
    }

    #[test]
    fn test_expresses_uncertainty_is_case_insensitive() {
        let markers = FixtureSet::builtin().uncertainty_markers;
        assert!(expresses_uncertainty("I'm NOT SURE about that.", markers));
        assert!(!expresses_uncertainty("It is definitely X.", markers));
    }

    #[test]
    fn test_token_estimate_is_chars_over_four() {
        assert!((estimate_tokens("12345678") - 2.0).abs() < 1e-9);
        assert!((estimate_tokens("") - 0.0).abs() < 1e-9);
    }
}
