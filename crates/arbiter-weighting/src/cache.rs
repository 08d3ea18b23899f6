//! Prefetched source-reliability cache
//!
//! An explicit cache object passed by reference into the components that
//! need it, so test isolation never depends on process-wide reset calls.

use arbiter_domain::traits::ReliabilitySource;
use std::collections::HashMap;

/// Cache of per-domain reliability scores in [0, 1]
///
/// `set(domain, None)` records that a lookup was attempted and the
/// source is unknown, so repeated pipeline runs do not re-ask upstream.
#[derive(Debug, Clone, Default)]
pub struct ReliabilityCache {
    scores: HashMap<String, Option<f64>>,
}

impl ReliabilityCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a cache from prefetched (domain, score) pairs
    pub fn from_scores<I, S>(scores: I) -> Self
    where
        I: IntoIterator<Item = (S, Option<f64>)>,
        S: Into<String>,
    {
        Self {
            scores: scores
                .into_iter()
                .map(|(domain, score)| (domain.into(), score))
                .collect(),
        }
    }

    /// Look up a cached score; outer `None` means the domain was never cached
    pub fn get(&self, domain: &str) -> Option<Option<f64>> {
        self.scores.get(domain).copied()
    }

    /// Record a score (or a known-unknown) for a domain
    pub fn set(&mut self, domain: impl Into<String>, score: Option<f64>) {
        self.scores.insert(domain.into(), score);
    }

    /// Drop every cached entry
    pub fn clear(&mut self) {
        self.scores.clear();
    }

    /// Number of cached domains
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Whether the cache holds no entries
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

impl ReliabilitySource for ReliabilityCache {
    fn score_for_domain(&self, domain: &str) -> Option<f64> {
        self.scores.get(domain).copied().flatten()
    }
}
