//! Analysis warnings - typed, severity-tagged pipeline diagnostics

use crate::claim::ClaimId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a warning, UUIDv7 for chronological sortability
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WarningId(u128);

impl WarningId {
    /// Generate a new UUIDv7-based WarningId
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }
}

impl Default for WarningId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for WarningId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

/// What kind of issue a warning reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WarningKind {
    /// Model output was missing or malformed and defaulted to neutral
    MalformedModelOutput,

    /// A verdict change cited only baseless challenges and was reverted
    BaselessChallengeReverted,

    /// A verdict's polarity contradicted its own rationale and was flipped
    InversionCorrected,

    /// A generated sub-claim argues the opposite of the user's thesis
    CounterClaimDetected,

    /// Boundary disagreement marked the claim contested
    ContestedClaim,

    /// A verdict change was kept but part of its provenance was baseless
    MixedProvenance,

    /// Advisory: cited evidence does not ground the stated rationale
    GroundingIssue,

    /// Advisory: truth polarity disagrees with aggregate evidence direction
    DirectionIssue,

    /// A verdict cites an evidence id absent from the pool
    DanglingEvidence,

    /// A finding references a boundary id absent from the cluster set
    DanglingBoundary,

    /// A truth percentage left the [0, 100] range
    OutOfRangePercentage,

    /// Stored label disagrees with the scale derivation
    LabelMismatch,

    /// High-harm confidence floor downgraded a verdict to Unverified
    HarmFloorApplied,

    /// Plausible truth interval exceeded the configured width
    WideRange,
}

/// Severity of a warning, used by report assembly to partition the stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WarningSeverity {
    /// Informational only
    Info,

    /// Advisory; verdict unchanged
    Advisory,

    /// Policy enforcement; verdict was deterministically changed
    Policy,

    /// Structural invariant violation; signals an upstream defect
    Structural,
}

/// A typed diagnostic emitted by the pipeline for observability
///
/// Warnings are append-only: stages add them, nothing removes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisWarning {
    /// Unique identifier
    pub id: WarningId,

    /// What kind of issue this is
    pub kind: WarningKind,

    /// Severity tag
    pub severity: WarningSeverity,

    /// Human-readable description
    pub message: String,

    /// Claim the warning concerns, if any
    pub claim_id: Option<ClaimId>,
}

impl AnalysisWarning {
    /// Create a warning attached to a claim
    pub fn for_claim(
        kind: WarningKind,
        severity: WarningSeverity,
        claim_id: ClaimId,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: WarningId::new(),
            kind,
            severity,
            message: message.into(),
            claim_id: Some(claim_id),
        }
    }

    /// Create a warning not tied to any single claim
    pub fn general(
        kind: WarningKind,
        severity: WarningSeverity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: WarningId::new(),
            kind,
            severity,
            message: message.into(),
            claim_id: None,
        }
    }
}
