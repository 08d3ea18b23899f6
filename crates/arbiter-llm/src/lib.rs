//! Arbiter Model-Call Layer
//!
//! Implementations of the `ModelCall` capability from `arbiter-domain`.
//!
//! # Callers
//!
//! - `StubCaller`: deterministic stub for testing, no network access
//! - `OllamaCaller`: local Ollama API integration for production wiring
//!
//! # Examples
//!
//! ```
//! use arbiter_llm::StubCaller;
//! use arbiter_domain::traits::{CallOptions, ModelCall};
//! use serde_json::json;
//!
//! # tokio_test::block_on(async {
//! let caller = StubCaller::new();
//! caller.push_response("advocate", json!({"verdicts": []}));
//! let out = caller
//!     .invoke("advocate", json!({}), CallOptions::default())
//!     .await
//!     .unwrap();
//! assert_eq!(out, json!({"verdicts": []}));
//! # });
//! ```

#![warn(missing_docs)]

pub mod ollama;

use arbiter_domain::traits::{CallOptions, ModelCall};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use ollama::OllamaCaller;

/// Errors that can occur during model calls
#[derive(Error, Debug)]
pub enum ModelCallError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Response was not the structured output the task expects
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic error
    #[error("Model call error: {0}")]
    Other(String),
}

/// One recorded invocation, kept by the stub for assertions
#[derive(Debug, Clone)]
pub struct RecordedCall {
    /// Task identifier the engine passed
    pub task: String,

    /// Payload the engine passed
    pub payload: Value,

    /// Options the engine passed
    pub options: CallOptions,
}

#[derive(Default)]
struct StubState {
    queues: HashMap<String, VecDeque<Value>>,
    errors: HashMap<String, VecDeque<String>>,
    calls: Vec<RecordedCall>,
}

/// Deterministic model-call stub for testing
///
/// Responses are queued per task id and consumed in order; a task with
/// an empty queue falls back to the default response. Every invocation
/// is recorded so tests can assert call counts and inspect payloads.
#[derive(Clone)]
pub struct StubCaller {
    default_response: Value,
    state: Arc<Mutex<StubState>>,
}

impl StubCaller {
    /// Create a stub whose default response is an empty JSON object
    pub fn new() -> Self {
        Self {
            default_response: Value::Object(Default::default()),
            state: Arc::new(Mutex::new(StubState::default())),
        }
    }

    /// Create a stub with a fixed default response for all tasks
    pub fn with_default(response: Value) -> Self {
        Self {
            default_response: response,
            state: Arc::new(Mutex::new(StubState::default())),
        }
    }

    /// Queue a response for a task; queued responses are consumed in order
    pub fn push_response(&self, task: impl Into<String>, response: Value) {
        self.state
            .lock()
            .unwrap()
            .queues
            .entry(task.into())
            .or_default()
            .push_back(response);
    }

    /// Queue an error for a task; it is returned before any queued response
    pub fn push_error(&self, task: impl Into<String>, message: impl Into<String>) {
        self.state
            .lock()
            .unwrap()
            .errors
            .entry(task.into())
            .or_default()
            .push_back(message.into());
    }

    /// Total number of invocations so far
    pub fn call_count(&self) -> usize {
        self.state.lock().unwrap().calls.len()
    }

    /// Number of invocations for one task
    pub fn calls_for(&self, task: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|c| c.task == task)
            .count()
    }

    /// Snapshot of all recorded invocations
    pub fn recorded_calls(&self) -> Vec<RecordedCall> {
        self.state.lock().unwrap().calls.clone()
    }
}

impl Default for StubCaller {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ModelCall for StubCaller {
    type Error = ModelCallError;

    async fn invoke(
        &self,
        task: &str,
        payload: Value,
        options: CallOptions,
    ) -> Result<Value, Self::Error> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(RecordedCall {
            task: task.to_string(),
            payload,
            options,
        });

        if let Some(errors) = state.errors.get_mut(task) {
            if let Some(message) = errors.pop_front() {
                return Err(ModelCallError::Other(message));
            }
        }

        if let Some(queue) = state.queues.get_mut(task) {
            if let Some(response) = queue.pop_front() {
                return Ok(response);
            }
        }

        Ok(self.default_response.clone())
    }
}
