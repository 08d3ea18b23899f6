//! Error types for the debate engine

use thiserror::Error;

/// Errors that can occur while running a debate
///
/// Model-call failures are fatal by design: the engine does not own
/// retry or backoff policy, the job runner that invoked it does. All
/// recoverable conditions (malformed output, advisory findings, policy
/// violations) surface as warning records instead of errors.
#[derive(Error, Debug)]
pub enum DebateError {
    /// The injected model-call capability failed
    #[error("Model call failed for task '{task}': {message}")]
    Model {
        /// Task identifier of the failed call
        task: &'static str,
        /// Error reported by the caller
        message: String,
    },

    /// The configuration record failed validation
    #[error("Invalid debate configuration: {0}")]
    Config(String),
}
