//! Arbiter Source Reliability & Evidence Weighting
//!
//! Converts per-source reliability scores into a multiplicative
//! adjustment applied to a claim's truth percentage and confidence.
//! Scores are consumed from an externally prefetched cache; this crate
//! never fetches or computes them.

#![warn(missing_docs)]

pub mod cache;
pub mod weighting;

pub use cache::ReliabilityCache;
pub use weighting::{apply_weighting, effective_weight, WeightingOutcome};
