use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Which model to evaluate and where it is served
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModelConfig {
    /// Model name as known to the serving endpoint
    #[serde(default = "default_model_name")]
    pub name: String,
    /// OpenAI-compatible API endpoint
    #[serde(default = "default_api_endpoint")]
    pub api_endpoint: String,
    /// Environment variable holding the API key; local servers usually
    /// need none
    #[serde(default)]
    pub api_key_env: Option<String>,
    /// Temperature for response generation (0.0 to 1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// Maximum tokens per generated response
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

/// Knobs for the evaluation run itself
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EvaluationSettings {
    /// How many performance prompts to time (at most the fixture table size)
    #[serde(default = "default_performance_samples")]
    pub performance_samples: usize,
    /// Where to write the markdown report
    #[serde(default = "default_report_path")]
    pub report_path: String,
}

/// Root run configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub evaluation: EvaluationSettings,
}

fn default_model_name() -> String {
    "llama3.2:1b".to_string()
}

fn default_api_endpoint() -> String {
    "http://localhost:11434/v1".to_string()
}

fn default_temperature() -> f64 {
    0.7
}

fn default_max_tokens() -> u32 {
    256
}

fn default_performance_samples() -> usize {
    10
}

fn default_report_path() -> String {
    "report.md".to_string()
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: default_model_name(),
            api_endpoint: default_api_endpoint(),
            api_key_env: None,
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

impl Default for EvaluationSettings {
    fn default() -> Self {
        Self {
            performance_samples: default_performance_samples(),
            report_path: default_report_path(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
    }
}
