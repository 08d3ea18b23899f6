//! Assessment boundaries - evidence clusters sharing a coherent methodology scope

use crate::claim::ClaimId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Stable identifier for an assessment boundary
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoundaryId(String);

impl BoundaryId {
    /// Wrap an upstream-assigned boundary id
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw id string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BoundaryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for BoundaryId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for BoundaryId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A cluster of evidence items sharing a coherent methodology or scope
///
/// Created once by the upstream clustering stage (e.g., grouping by
/// measurement standard or jurisdiction), consumed read-only here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentBoundary {
    /// Stable identifier
    pub id: BoundaryId,

    /// Short human-readable label
    pub label: String,

    /// Description of the shared methodology/scope
    pub scope_description: String,

    /// Number of evidence items in the cluster
    pub item_count: usize,

    /// Internal coherence of the cluster, [0, 1], if computed upstream
    pub coherence: Option<f64>,
}

impl AssessmentBoundary {
    /// Create a new boundary
    pub fn new(
        id: impl Into<BoundaryId>,
        label: impl Into<String>,
        scope_description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            scope_description: scope_description.into(),
            item_count: 0,
            coherence: None,
        }
    }
}

/// Claims × boundaries incidence structure
///
/// Records how many evidence items link each claim to each boundary.
/// Built once upstream via [`CoverageMatrix::record`], then read-only
/// input to verdict generation and the structural check.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoverageMatrix {
    counts: BTreeMap<ClaimId, BTreeMap<BoundaryId, usize>>,
}

impl CoverageMatrix {
    /// Create an empty matrix
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one evidence link between a claim and a boundary
    pub fn record(&mut self, claim: &ClaimId, boundary: &BoundaryId) {
        *self
            .counts
            .entry(claim.clone())
            .or_default()
            .entry(boundary.clone())
            .or_default() += 1;
    }

    /// Number of evidence items linking a claim to a boundary
    pub fn link_count(&self, claim: &ClaimId, boundary: &BoundaryId) -> usize {
        self.counts
            .get(claim)
            .and_then(|row| row.get(boundary))
            .copied()
            .unwrap_or(0)
    }

    /// Boundaries that have at least one evidence link to the claim
    pub fn boundaries_for_claim(&self, claim: &ClaimId) -> Vec<&BoundaryId> {
        self.counts
            .get(claim)
            .map(|row| row.keys().collect())
            .unwrap_or_default()
    }

    /// Claims that have at least one evidence link to the boundary
    pub fn claims_for_boundary(&self, boundary: &BoundaryId) -> Vec<&ClaimId> {
        self.counts
            .iter()
            .filter(|(_, row)| row.contains_key(boundary))
            .map(|(claim, _)| claim)
            .collect()
    }
}
