use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::SchedulerConfig;

pub const DEFAULT_TEXTGEN_URL: &str =
    "https://api-inference.huggingface.co/models/facebook/blenderbot-400M-distill";

#[derive(Debug, Error)]
pub enum TextGenError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to inference endpoint failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("inference endpoint returned {0}")]
    Status(reqwest::StatusCode),

    #[error("remote text generation is disabled")]
    Disabled,
}

/// Conversational text generation. `Ok(None)` means the endpoint answered
/// but produced no text.
pub trait TextGeneration: Send + Sync + 'static {
    fn generate(
        &self,
        prompt: &str,
        context: &str,
    ) -> impl Future<Output = Result<Option<String>, TextGenError>> + Send;
}

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: InferenceInputs<'a>,
}

#[derive(Debug, Serialize)]
struct InferenceInputs<'a> {
    past_user_inputs: Vec<&'a str>,
    generated_responses: Vec<&'a str>,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct InferenceResponse {
    generated_text: Option<String>,
}

/// Client for a hosted conversational model. One POST per call, no retry.
#[derive(Debug, Clone)]
pub struct HttpTextGenerator {
    client: reqwest::Client,
    url: String,
}

impl HttpTextGenerator {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, TextGenError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(TextGenError::Client)?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl TextGeneration for HttpTextGenerator {
    async fn generate(&self, prompt: &str, context: &str) -> Result<Option<String>, TextGenError> {
        let past_user_inputs = if context.is_empty() {
            Vec::new()
        } else {
            vec![context]
        };
        let body = InferenceRequest {
            inputs: InferenceInputs {
                past_user_inputs,
                generated_responses: Vec::new(),
                text: prompt,
            },
        };

        let response = self.client.post(&self.url).json(&body).send().await?;

        if !response.status().is_success() {
            return Err(TextGenError::Status(response.status()));
        }

        let data: InferenceResponse = response.json().await?;
        Ok(data.generated_text.filter(|text| !text.trim().is_empty()))
    }
}

/// Generator that always fails, so callers take their local fallback
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledTextGeneration;

impl TextGeneration for DisabledTextGeneration {
    async fn generate(&self, _prompt: &str, _context: &str) -> Result<Option<String>, TextGenError> {
        Err(TextGenError::Disabled)
    }
}

/// Text generation selected by configuration
#[derive(Debug, Clone)]
pub enum TextGenBackend {
    Http(HttpTextGenerator),
    Disabled(DisabledTextGeneration),
}

impl TextGenBackend {
    pub fn from_config(config: &SchedulerConfig) -> Result<Self, TextGenError> {
        if !config.remote_generation {
            return Ok(TextGenBackend::Disabled(DisabledTextGeneration));
        }
        let client = HttpTextGenerator::new(config.textgen_url.clone(), config.textgen_timeout)?;
        Ok(TextGenBackend::Http(client))
    }
}

impl TextGeneration for TextGenBackend {
    async fn generate(&self, prompt: &str, context: &str) -> Result<Option<String>, TextGenError> {
        match self {
            TextGenBackend::Http(client) => client.generate(prompt, context).await,
            TextGenBackend::Disabled(disabled) => disabled.generate(prompt, context).await,
        }
    }
}
