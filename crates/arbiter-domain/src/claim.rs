//! Claim module - the unit of assertion the debate pipeline adjudicates

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier for an atomic claim
///
/// Claim ids are minted by the upstream extraction stage and treated as
/// opaque strings here; the engine never generates or rewrites them.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimId(String);

impl ClaimId {
    /// Wrap an upstream-assigned claim id
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw id string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClaimId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ClaimId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// How central a claim is to the user's thesis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Centrality {
    /// Load-bearing for the thesis
    High,

    /// Supporting detail
    Medium,
}

impl Centrality {
    /// Get the centrality name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Centrality::High => "high",
            Centrality::Medium => "medium",
        }
    }

    /// Parse a centrality tier from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "high" => Some(Centrality::High),
            "medium" => Some(Centrality::Medium),
            _ => None,
        }
    }
}

/// Harm potential if a wrong verdict is issued for this claim
///
/// Claims in the configured high-harm tiers are subject to the
/// confidence floor: a confident-sounding directional verdict on a
/// high-harm topic is never issued on thin evidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HarmPotential {
    /// Medical, legal, safety-critical topics
    Critical,

    /// Reputational or financial stakes
    High,

    /// Everyday factual disputes
    Medium,

    /// Trivia-grade claims
    Low,
}

impl HarmPotential {
    /// Get the harm tier name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            HarmPotential::Critical => "critical",
            HarmPotential::High => "high",
            HarmPotential::Medium => "medium",
            HarmPotential::Low => "low",
        }
    }

    /// Parse a harm tier from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "critical" => Some(HarmPotential::Critical),
            "high" => Some(HarmPotential::High),
            "medium" => Some(HarmPotential::Medium),
            "low" => Some(HarmPotential::Low),
            _ => None,
        }
    }
}

impl std::str::FromStr for HarmPotential {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid harm tier: {}", s))
    }
}

/// A single verifiable assertion extracted from the user's submission
///
/// Immutable once produced by the upstream extraction stage; the debate
/// pipeline reads claims, it never rewrites them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtomicClaim {
    /// Stable identifier
    pub id: ClaimId,

    /// The claim text
    pub text: String,

    /// Centrality to the user's thesis
    pub centrality: Centrality,

    /// Harm potential of a wrong verdict
    pub harm: HarmPotential,

    /// Named entities mentioned by the claim
    pub entities: Vec<String>,
}

impl AtomicClaim {
    /// Create a new claim
    pub fn new(
        id: impl Into<ClaimId>,
        text: impl Into<String>,
        centrality: Centrality,
        harm: HarmPotential,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            centrality,
            harm,
            entities: Vec::new(),
        }
    }

    /// Attach named entities
    pub fn with_entities(mut self, entities: Vec<String>) -> Self {
        self.entities = entities;
        self
    }
}

impl From<String> for ClaimId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_id_roundtrip() {
        let id = ClaimId::new("claim-7");
        assert_eq!(id.as_str(), "claim-7");
        assert_eq!(id.to_string(), "claim-7");
    }

    #[test]
    fn test_harm_parse() {
        assert_eq!(HarmPotential::parse("critical"), Some(HarmPotential::Critical));
        assert_eq!(HarmPotential::parse("CRITICAL"), Some(HarmPotential::Critical));
        assert_eq!(HarmPotential::parse("none"), None);
    }

    #[test]
    fn test_harm_as_str_roundtrip() {
        for harm in [
            HarmPotential::Critical,
            HarmPotential::High,
            HarmPotential::Medium,
            HarmPotential::Low,
        ] {
            assert_eq!(HarmPotential::parse(harm.as_str()), Some(harm));
        }
    }

    #[test]
    fn test_centrality_parse() {
        assert_eq!(Centrality::parse("high"), Some(Centrality::High));
        assert_eq!(Centrality::parse("medium"), Some(Centrality::Medium));
        assert_eq!(Centrality::parse("low"), None);
    }
}
