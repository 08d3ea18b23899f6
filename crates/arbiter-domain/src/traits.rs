//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the debate engine and
//! infrastructure. Implementations live in other crates; the engine is
//! testable with zero network access by substituting deterministic stubs.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Model capability tier requested for a call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelTier {
    /// Fast, inexpensive model; bulk debate steps
    Cheap,

    /// Strongest available model; reconciliation-grade judgment
    Flagship,
}

impl Default for ModelTier {
    fn default() -> Self {
        ModelTier::Cheap
    }
}

/// Options for a single model call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CallOptions {
    /// Requested model tier
    pub tier: ModelTier,

    /// Sampling temperature override, if any
    pub temperature: Option<f64>,

    /// Provider override, bypassing the default routing
    pub provider_override: Option<String>,
}

impl CallOptions {
    /// Options for a tier with default sampling
    pub fn tiered(tier: ModelTier) -> Self {
        Self {
            tier,
            ..Self::default()
        }
    }

    /// Set the sampling temperature
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// The injected model-call capability
///
/// The sole seam to any concrete model provider. Takes a task
/// identifier, a structured payload (plain data, no behavior), and call
/// options; returns structured, already-parsed output. Model choice,
/// retries, and transport are the implementation's concern, not the
/// engine's: an error from `invoke` propagates to the caller untouched.
#[async_trait]
pub trait ModelCall: Send + Sync {
    /// Error type for call failures
    type Error: std::error::Error + Send + Sync + 'static;

    /// Perform one model call
    async fn invoke(
        &self,
        task: &str,
        payload: Value,
        options: CallOptions,
    ) -> Result<Value, Self::Error>;
}

/// Synchronous source-reliability lookup
///
/// Backed by an externally prefetched cache; the engine only consumes
/// scores, it never fetches or computes them. `None` means the source
/// is unknown, which weighting treats as an explicit neutral policy.
pub trait ReliabilitySource {
    /// Reliability score in [0, 1] for a source domain, if known
    fn score_for_domain(&self, domain: &str) -> Option<f64>;
}
