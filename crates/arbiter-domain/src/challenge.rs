//! Adversarial challenges and the reconciler's replies to them

use crate::claim::ClaimId;
use crate::evidence::EvidenceId;
use serde::{Deserialize, Serialize};

/// Kind of adversarial objection raised against a verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChallengeType {
    /// The verdict rests on an unstated assumption
    Assumption,

    /// Decisive evidence is absent from the pool
    MissingEvidence,

    /// The cited evidence's methodology is weak
    MethodologyWeakness,

    /// Cited sources are not independent of each other
    IndependenceConcern,
}

impl ChallengeType {
    /// Get the challenge type name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ChallengeType::Assumption => "assumption",
            ChallengeType::MissingEvidence => "missing-evidence",
            ChallengeType::MethodologyWeakness => "methodology-weakness",
            ChallengeType::IndependenceConcern => "independence-concern",
        }
    }

    /// Parse a challenge type from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "assumption" => Some(ChallengeType::Assumption),
            "missing-evidence" => Some(ChallengeType::MissingEvidence),
            "methodology-weakness" => Some(ChallengeType::MethodologyWeakness),
            "independence-concern" => Some(ChallengeType::IndependenceConcern),
            _ => None,
        }
    }
}

/// Severity the challenger assigns to an objection
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChallengeSeverity {
    /// Worth noting, unlikely to move the verdict
    Low,

    /// Should be weighed during reconciliation
    Medium,

    /// Potentially verdict-changing
    High,
}

impl ChallengeSeverity {
    /// Get the severity name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ChallengeSeverity::Low => "low",
            ChallengeSeverity::Medium => "medium",
            ChallengeSeverity::High => "high",
        }
    }

    /// Parse a severity from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(ChallengeSeverity::Low),
            "medium" => Some(ChallengeSeverity::Medium),
            "high" => Some(ChallengeSeverity::High),
            _ => None,
        }
    }
}

/// Post-hoc record of which cited evidence ids actually exist
///
/// Produced by a deterministic existence check against the real evidence
/// pool before reconciliation; no semantic judgment is involved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CitationCheck {
    /// Cited ids present in the evidence pool
    pub valid: Vec<EvidenceId>,

    /// Cited ids absent from the evidence pool
    pub invalid: Vec<EvidenceId>,
}

impl CitationCheck {
    /// Whether at least one cited id resolves to real evidence
    pub fn has_valid_citation(&self) -> bool {
        !self.valid.is_empty()
    }
}

/// A single adversarial objection keyed by claim id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChallengePoint {
    /// Identifier the reconciler uses for provenance
    pub id: String,

    /// Claim the objection targets
    pub claim_id: ClaimId,

    /// Kind of objection
    pub challenge_type: ChallengeType,

    /// Challenger-assigned severity
    pub severity: ChallengeSeverity,

    /// The objection itself
    pub description: String,

    /// Evidence ids the challenger cites
    pub cited_evidence: Vec<EvidenceId>,

    /// Filled in by the deterministic citation check; `None` until then
    pub citation_check: Option<CitationCheck>,
}

/// All challenge points produced for one debate run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChallengeDocument {
    /// Objections across all claims
    pub points: Vec<ChallengePoint>,
}

impl ChallengeDocument {
    /// Objections targeting one claim
    pub fn points_for_claim(&self, claim_id: &ClaimId) -> Vec<&ChallengePoint> {
        self.points
            .iter()
            .filter(|p| &p.claim_id == claim_id)
            .collect()
    }

    /// Look up a point by its provenance id
    pub fn point(&self, id: &str) -> Option<&ChallengePoint> {
        self.points.iter().find(|p| p.id == id)
    }
}

/// The reconciler's reply to challenges it acted on
///
/// Provenance is mandatory: a reply that changed the verdict must name
/// the challenge-point ids that justified the change, or the change is
/// reverted by baseless-challenge enforcement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChallengeResponse {
    /// Challenge-point ids that justified this reply
    pub challenge_point_ids: Vec<String>,

    /// Whether the reply changed the verdict
    pub verdict_changed: bool,

    /// The reconciler's reply text
    pub reply: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(id: &str, claim: &str) -> ChallengePoint {
        ChallengePoint {
            id: id.to_string(),
            claim_id: ClaimId::from(claim),
            challenge_type: ChallengeType::Assumption,
            severity: ChallengeSeverity::Medium,
            description: "assumes the survey was representative".to_string(),
            cited_evidence: vec![EvidenceId::from("e1")],
            citation_check: None,
        }
    }

    #[test]
    fn test_points_for_claim() {
        let doc = ChallengeDocument {
            points: vec![point("cp1", "c1"), point("cp2", "c2"), point("cp3", "c1")],
        };

        let c1 = ClaimId::from("c1");
        let for_c1 = doc.points_for_claim(&c1);
        assert_eq!(for_c1.len(), 2);
        assert!(for_c1.iter().all(|p| p.claim_id == c1));
    }

    #[test]
    fn test_point_lookup() {
        let doc = ChallengeDocument {
            points: vec![point("cp1", "c1")],
        };
        assert!(doc.point("cp1").is_some());
        assert!(doc.point("cp9").is_none());
    }

    #[test]
    fn test_citation_check() {
        let mut check = CitationCheck::default();
        assert!(!check.has_valid_citation());
        check.valid.push(EvidenceId::from("e1"));
        assert!(check.has_valid_citation());
    }

    #[test]
    fn test_challenge_type_roundtrip() {
        for t in [
            ChallengeType::Assumption,
            ChallengeType::MissingEvidence,
            ChallengeType::MethodologyWeakness,
            ChallengeType::IndependenceConcern,
        ] {
            assert_eq!(ChallengeType::parse(t.as_str()), Some(t));
        }
    }
}
