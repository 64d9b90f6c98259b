use crate::client::ChatClient;
use crate::error::EvalError;
use crate::evaluator::expresses_uncertainty;
use crate::fixtures::{CompletionScenario, FixtureSet};
use crate::models::{BenchmarkReport, BenchmarkScore};

/// HellaSwag prompts always list the correct continuation as option A
const CORRECT_OPTION: char = 'A';

/// Runs miniature samples of MMLU, TruthfulQA, and HellaSwag against one
/// model and scores responses with substring/keyword heuristics.
///
/// These are tiny demonstration sets, nowhere near the full benchmarks.
pub struct BenchmarkRunner<C: ChatClient> {
    client: C,
    fixtures: FixtureSet,
    verbose: bool,
}

impl<C: ChatClient> BenchmarkRunner<C> {
    pub fn new(client: C, fixtures: FixtureSet, verbose: bool) -> Self {
        Self {
            client,
            fixtures,
            verbose,
        }
    }

    /// Sampled MMLU: multiple-choice questions scored by case-insensitive
    /// containment of the answer text
    pub async fn run_mmlu_sample(&self) -> Result<BenchmarkScore, EvalError> {
        let questions = self.fixtures.mmlu_questions;
        if questions.is_empty() {
            return Err(EvalError::EmptySampleSet("mmlu questions"));
        }

        let mut correct = 0;
        for (i, q) in questions.iter().enumerate() {
            self.log_progress("mmlu", i + 1, questions.len());
            let prompt = format!(
                "{}\nChoices: {}\nAnswer:",
                q.question,
                q.choices.join(", ")
            );
            let outcome = self.client.chat(&prompt).await?;

            if outcome
                .content
                .to_lowercase()
                .contains(&q.answer.to_lowercase())
            {
                correct += 1;
            }
        }

        Ok(score(correct, questions.len()))
    }

    /// Sampled TruthfulQA: a response is correct when its hedging matches
    /// whether the question actually has a knowable answer
    pub async fn run_truthfulqa_sample(&self) -> Result<BenchmarkScore, EvalError> {
        let probes = self.fixtures.truthfulqa_probes;
        if probes.is_empty() {
            return Err(EvalError::EmptySampleSet("truthfulqa probes"));
        }

        let mut correct = 0;
        for (i, probe) in probes.iter().enumerate() {
            self.log_progress("truthfulqa", i + 1, probes.len());
            let outcome = self.client.chat(probe.question).await?;

            let hedged =
                expresses_uncertainty(&outcome.content, self.fixtures.truthfulness_markers);
            if hedged == probe.should_express_uncertainty {
                correct += 1;
            }
        }

        Ok(score(correct, probes.len()))
    }

    /// Sampled HellaSwag: commonsense continuation choice, scored on the
    /// first whitespace-delimited token of the response
    pub async fn run_hellaswag_sample(&self) -> Result<BenchmarkScore, EvalError> {
        let scenarios = self.fixtures.hellaswag_scenarios;
        if scenarios.is_empty() {
            return Err(EvalError::EmptySampleSet("hellaswag scenarios"));
        }

        let mut correct = 0;
        for (i, scenario) in scenarios.iter().enumerate() {
            self.log_progress("hellaswag", i + 1, scenarios.len());
            let outcome = self.client.chat(&hellaswag_prompt(scenario)).await?;

            if first_token_contains(&outcome.content, CORRECT_OPTION) {
                correct += 1;
            }
        }

        Ok(score(correct, scenarios.len()))
    }

    /// Run the three samples in order and average their scores into one
    /// unweighted aggregate
    pub async fn run_all_benchmarks(&self) -> Result<BenchmarkReport, EvalError> {
        if self.verbose {
            println!("Running benchmarks on {}", self.client.model());
        }

        let mmlu = self.run_mmlu_sample().await?;
        let truthfulqa = self.run_truthfulqa_sample().await?;
        let hellaswag = self.run_hellaswag_sample().await?;

        let aggregate_score = (mmlu.score + truthfulqa.score + hellaswag.score) / 3.0;

        Ok(BenchmarkReport {
            mmlu,
            truthfulqa,
            hellaswag,
            aggregate_score,
        })
    }

    fn log_progress(&self, kind: &str, current: usize, total: usize) {
        if self.verbose {
            println!("  → {} {}/{}", kind, current, total);
        }
    }
}

fn score(correct: usize, total: usize) -> BenchmarkScore {
    BenchmarkScore {
        score: correct as f64 / total as f64,
        questions_tested: total,
        correct,
    }
}

fn hellaswag_prompt(scenario: &CompletionScenario) -> String {
    format!(
        "{}\n\nWhich is more likely:\nA) {}\nB) {}\n\nAnswer with A or B:",
        scenario.context, scenario.correct_ending, scenario.wrong_ending
    )
}

/// Only the first whitespace-delimited token of the uppercased response is
/// inspected, so a response that leads with filler text ("Sure, it would
/// be A") can be misscored.
fn first_token_contains(response: &str, letter: char) -> bool {
    response
        .to_uppercase()
        .split_whitespace()
        .next()
        .is_some_and(|token| token.contains(letter))
}
