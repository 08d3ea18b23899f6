//! Ollama Caller Implementation
//!
//! Wires the `ModelCall` capability to a local Ollama instance. Each
//! debate task is rendered as an instruction header plus the structured
//! payload; the model's reply is expected to be JSON, optionally wrapped
//! in a markdown code fence.
//!
//! # Features
//!
//! - Async HTTP communication with Ollama API
//! - Configurable endpoint and per-tier models
//! - Retry logic with exponential backoff
//! - Timeout handling

use crate::ModelCallError;
use arbiter_domain::traits::{CallOptions, ModelCall, ModelTier};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::warn;

/// Default Ollama API endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// Default timeout for model requests (60 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default number of retry attempts
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Ollama-backed model caller for local inference
pub struct OllamaCaller {
    endpoint: String,
    cheap_model: String,
    flagship_model: String,
    client: reqwest::Client,
    max_retries: u32,
}

/// Request body for Ollama generate API
#[derive(Serialize)]
struct OllamaGenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<OllamaOptions>,
}

#[derive(Serialize)]
struct OllamaOptions {
    temperature: f64,
}

/// Response from Ollama generate API
#[derive(Deserialize)]
struct OllamaGenerateResponse {
    response: String,
    #[allow(dead_code)]
    done: bool,
}

impl OllamaCaller {
    /// Create a new Ollama caller
    ///
    /// # Parameters
    ///
    /// - `endpoint`: Ollama API endpoint (e.g., "http://localhost:11434")
    /// - `cheap_model`: model used for `ModelTier::Cheap` calls
    /// - `flagship_model`: model used for `ModelTier::Flagship` calls
    pub fn new(
        endpoint: impl Into<String>,
        cheap_model: impl Into<String>,
        flagship_model: impl Into<String>,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap();

        Self {
            endpoint: endpoint.into(),
            cheap_model: cheap_model.into(),
            flagship_model: flagship_model.into(),
            client,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Create a caller against the default local endpoint
    pub fn default_endpoint(
        cheap_model: impl Into<String>,
        flagship_model: impl Into<String>,
    ) -> Self {
        Self::new(DEFAULT_ENDPOINT, cheap_model, flagship_model)
    }

    /// Set the maximum number of retry attempts
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    fn model_for(&self, options: &CallOptions) -> String {
        if let Some(provider) = &options.provider_override {
            return provider.clone();
        }
        match options.tier {
            ModelTier::Cheap => self.cheap_model.clone(),
            ModelTier::Flagship => self.flagship_model.clone(),
        }
    }

    fn render_prompt(task: &str, payload: &Value) -> String {
        format!(
            "Task: {}\n\nInput (JSON):\n{}\n\nRespond with valid JSON only, no markdown, no explanations.",
            task,
            serde_json::to_string_pretty(payload).unwrap_or_else(|_| payload.to_string())
        )
    }

    async fn generate(&self, request_body: &OllamaGenerateRequest) -> Result<String, ModelCallError> {
        let url = format!("{}/api/generate", self.endpoint);

        // Retry logic with exponential backoff
        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_retries {
            match self.client.post(&url).json(request_body).send().await {
                Ok(response) => {
                    if response.status().is_success() {
                        match response.json::<OllamaGenerateResponse>().await {
                            Ok(ollama_response) => {
                                return Ok(ollama_response.response);
                            }
                            Err(e) => {
                                return Err(ModelCallError::InvalidResponse(format!(
                                    "Failed to parse response: {}",
                                    e
                                )));
                            }
                        }
                    } else if response.status() == reqwest::StatusCode::NOT_FOUND {
                        return Err(ModelCallError::ModelNotAvailable(request_body.model.clone()));
                    } else {
                        let status = response.status();
                        let error_text = response
                            .text()
                            .await
                            .unwrap_or_else(|_| "Unknown error".to_string());
                        last_error = Some(ModelCallError::Communication(format!(
                            "HTTP {}: {}",
                            status, error_text
                        )));
                    }
                }
                Err(e) => {
                    last_error = Some(ModelCallError::Communication(format!(
                        "Request failed: {}",
                        e
                    )));
                }
            }

            attempts += 1;
            if attempts < self.max_retries {
                // Exponential backoff: 1s, 2s, 4s, etc.
                let delay = Duration::from_secs(2u64.pow(attempts - 1));
                warn!(
                    attempt = attempts,
                    max = self.max_retries,
                    delay_secs = delay.as_secs(),
                    "Ollama request failed, retrying"
                );
                tokio::time::sleep(delay).await;
            }
        }

        Err(last_error
            .unwrap_or_else(|| ModelCallError::Communication("Max retries exceeded".to_string())))
    }
}

/// Strip a markdown code fence if the model wrapped its JSON in one
fn extract_json(response: &str) -> &str {
    let trimmed = response.trim();
    if let Some(rest) = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
    {
        rest.trim_start_matches('\n')
            .strip_suffix("```")
            .unwrap_or(rest)
            .trim()
    } else {
        trimmed
    }
}

#[async_trait]
impl ModelCall for OllamaCaller {
    type Error = ModelCallError;

    async fn invoke(
        &self,
        task: &str,
        payload: Value,
        options: CallOptions,
    ) -> Result<Value, Self::Error> {
        let request_body = OllamaGenerateRequest {
            model: self.model_for(&options),
            prompt: Self::render_prompt(task, &payload),
            stream: false,
            options: options
                .temperature
                .map(|temperature| OllamaOptions { temperature }),
        };

        let raw = self.generate(&request_body).await?;

        serde_json::from_str(extract_json(&raw)).map_err(|e| {
            ModelCallError::InvalidResponse(format!("Task '{}' returned non-JSON output: {}", task, e))
        })
    }
}
