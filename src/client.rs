use crate::config::ModelConfig;
use crate::error::EvalError;
use anyhow::{Context, Result};
use async_openai::{
    Client, config::OpenAIConfig,
    types::{
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequest,
        CreateChatCompletionRequestArgs, CreateChatCompletionResponse,
    },
};
use std::time::{Duration, Instant};

/// Key sent when no API key environment variable is configured. Local
/// inference servers accept any value here.
const PLACEHOLDER_API_KEY: &str = "local";

/// Text and wall-clock timing from a single chat call
#[derive(Debug, Clone)]
pub struct ChatOutcome {
    /// The generated text response
    pub content: String,
    /// Elapsed wall-clock time for the call
    pub elapsed: Duration,
}

/// The one inference boundary the pipeline depends on: a model identifier
/// plus a single user prompt in, generated text plus timing out.
///
/// Calls are issued one at a time and are never retried. There is no
/// per-call timeout: a hung endpoint blocks the run.
pub trait ChatClient {
    /// Model identifier requests are issued against
    fn model(&self) -> &str;

    /// Send one prompt and return the response with timing
    async fn chat(&self, prompt: &str) -> Result<ChatOutcome, EvalError>;
}

impl<C: ChatClient> ChatClient for &C {
    fn model(&self) -> &str {
        (**self).model()
    }

    async fn chat(&self, prompt: &str) -> Result<ChatOutcome, EvalError> {
        (**self).chat(prompt).await
    }
}

/// Chat adapter for OpenAI-compatible endpoints, including local servers
/// such as Ollama's `/v1` surface
#[derive(Debug)]
pub struct OpenAiChatClient {
    client: Client<OpenAIConfig>,
    model: String,
    temperature: f64,
    max_tokens: u32,
    endpoint: String,
}

impl OpenAiChatClient {
    /// Build a client from the model section of the run configuration
    pub fn from_config(config: &ModelConfig) -> Result<Self> {
        let api_key = match &config.api_key_env {
            Some(var) => std::env::var(var)
                .with_context(|| format!("Environment variable {} not found", var))?,
            None => PLACEHOLDER_API_KEY.to_string(),
        };

        let openai_config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(&config.api_endpoint);

        Ok(Self {
            client: Client::with_config(openai_config),
            model: config.name.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            endpoint: config.api_endpoint.clone(),
        })
    }

    /// Check that something is listening at the endpoint before starting a
    /// run. Any HTTP answer counts; only transport failures are errors.
    pub async fn probe_endpoint(&self) -> Result<(), EvalError> {
        reqwest::get(&self.endpoint)
            .await
            .map_err(|e| EvalError::ModelUnavailable {
                endpoint: self.endpoint.clone(),
                reason: e.to_string(),
            })?;
        Ok(())
    }

    fn build_request(&self, prompt: &str) -> Result<CreateChatCompletionRequest, EvalError> {
        let user_message = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt.to_string())
            .build()
            .map_err(|e| EvalError::Inference(e.to_string()))?
            .into();

        CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages([user_message])
            .temperature(self.temperature as f32)
            .max_tokens(self.max_tokens as u16)
            .build()
            .map_err(|e| EvalError::Inference(e.to_string()))
    }

    fn extract_content(response: CreateChatCompletionResponse) -> Result<String, EvalError> {
        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .ok_or_else(|| {
                EvalError::MalformedResponse("response contained no message content".to_string())
            })
    }
}

impl ChatClient for OpenAiChatClient {
    fn model(&self) -> &str {
        &self.model
    }

    async fn chat(&self, prompt: &str) -> Result<ChatOutcome, EvalError> {
        let request = self.build_request(prompt)?;

        let start = Instant::now();
        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| EvalError::Inference(e.to_string()))?;
        let elapsed = start.elapsed();

        let content = Self::extract_content(response)?;

        Ok(ChatOutcome { content, elapsed })
    }
}
