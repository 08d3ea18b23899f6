//! Verdict records - the mutable work-in-progress output of the debate pipeline

use crate::boundary::BoundaryId;
use crate::challenge::ChallengeResponse;
use crate::claim::{ClaimId, HarmPotential};
use crate::evidence::{EvidenceDirection, EvidenceId};
use crate::scale::{clamp_percentage, clamp_truth_percentage, label_for, BandConfig, VerdictLabel};
use serde::{Deserialize, Serialize};

/// Percentages observed from repeated advocate runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyResult {
    /// Whether the check actually ran; `false` when administratively disabled
    pub assessed: bool,

    /// Truth percentages observed across runs (original plus re-runs)
    pub observed_pcts: Vec<f64>,

    /// max - min of the observed percentages
    pub spread: f64,

    /// Whether the spread stayed within the stability threshold
    pub stable: bool,
}

impl ConsistencyResult {
    /// Result for a claim whose check was skipped
    pub fn skipped() -> Self {
        Self {
            assessed: false,
            observed_pcts: Vec::new(),
            spread: 0.0,
            stable: true,
        }
    }

    /// Build a result from observed percentages and a stability threshold
    pub fn from_observations(observed: Vec<f64>, stable_threshold: f64) -> Self {
        let spread = match (
            observed.iter().cloned().fold(f64::INFINITY, f64::min),
            observed.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
        ) {
            (min, max) if min.is_finite() && max.is_finite() => max - min,
            _ => 0.0,
        };
        Self {
            assessed: true,
            stable: spread <= stable_threshold,
            observed_pcts: observed,
            spread,
        }
    }
}

/// Per-boundary truth/confidence/direction snapshot for one claim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryFinding {
    /// Boundary the finding belongs to
    pub boundary_id: BoundaryId,

    /// Truth percentage within this boundary's evidence
    pub truth_pct: f64,

    /// Confidence within this boundary's evidence
    pub confidence: f64,

    /// Net direction of this boundary's evidence
    pub direction: EvidenceDirection,
}

/// Cross-boundary agreement summary for one claim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriangulationScore {
    /// Boundaries that contributed findings
    pub boundary_count: usize,

    /// Agreement across boundaries, [0, 1]; 1 = all boundaries concur
    pub agreement: f64,

    /// max - min truth percentage across boundary findings
    pub spread: f64,
}

/// Informational confidence tier attached by Gate 4
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceTier {
    /// Confidence >= 75
    High,

    /// Confidence >= 50
    Moderate,

    /// Confidence >= 25
    Low,

    /// Confidence < 25
    Insufficient,
}

impl ConfidenceTier {
    /// Classify a confidence percentage into a tier
    pub fn classify(confidence: f64) -> Self {
        let conf = clamp_percentage(confidence);
        if conf >= 75.0 {
            ConfidenceTier::High
        } else if conf >= 50.0 {
            ConfidenceTier::Moderate
        } else if conf >= 25.0 {
            ConfidenceTier::Low
        } else {
            ConfidenceTier::Insufficient
        }
    }
}

/// The work-in-progress verdict record for one claim
///
/// Created by the advocate step, progressively refined by each
/// subsequent debate step, finalized after confidence classification.
/// The stored label must always be re-derivable from
/// (truth_pct, confidence) via the truth scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimVerdict {
    /// Claim this verdict is for
    pub claim_id: ClaimId,

    /// Truth percentage, [0, 100]
    pub truth_pct: f64,

    /// Seven-point label derived from (truth_pct, confidence)
    pub label: VerdictLabel,

    /// Confidence, [0, 100]
    pub confidence: f64,

    /// Free-text rationale
    pub rationale: String,

    /// Harm potential, copied from the claim
    pub harm: HarmPotential,

    /// Whether boundaries disagree enough to call the claim contested
    pub contested: bool,

    /// Evidence ids supporting the verdict
    pub supporting_evidence: Vec<EvidenceId>,

    /// Evidence ids contradicting the verdict
    pub contradicting_evidence: Vec<EvidenceId>,

    /// Per-boundary findings
    pub boundary_findings: Vec<BoundaryFinding>,

    /// Self-consistency check result
    pub consistency: ConsistencyResult,

    /// Reconciler replies to challenges acted on
    pub challenge_responses: Vec<ChallengeResponse>,

    /// Cross-boundary agreement summary, if computed
    pub triangulation: Option<TriangulationScore>,

    /// Whether the claim argues the opposite of the user's thesis
    pub counter_claim: bool,

    /// Plausible truth-percentage interval from range reporting
    pub truth_range: Option<(f64, f64)>,

    /// Informational tier attached by Gate 4
    pub confidence_tier: Option<ConfidenceTier>,
}

impl ClaimVerdict {
    /// Create a fresh verdict with clamped values and a derived label
    pub fn new(
        claim_id: ClaimId,
        truth_pct: f64,
        confidence: f64,
        rationale: impl Into<String>,
        harm: HarmPotential,
        bands: &BandConfig,
    ) -> Self {
        let truth_pct = clamp_truth_percentage(truth_pct);
        let confidence = clamp_percentage(confidence);
        Self {
            claim_id,
            truth_pct,
            label: label_for(truth_pct, Some(confidence), bands),
            confidence,
            rationale: rationale.into(),
            harm,
            contested: false,
            supporting_evidence: Vec::new(),
            contradicting_evidence: Vec::new(),
            boundary_findings: Vec::new(),
            consistency: ConsistencyResult::skipped(),
            challenge_responses: Vec::new(),
            triangulation: None,
            counter_claim: false,
            truth_range: None,
            confidence_tier: None,
        }
    }

    /// Set truth and confidence together, re-deriving the label
    ///
    /// The only sanctioned way to move a verdict: it keeps the stored
    /// label consistent with the scale derivation invariant.
    pub fn set_scores(&mut self, truth_pct: f64, confidence: f64, bands: &BandConfig) {
        self.truth_pct = clamp_truth_percentage(truth_pct);
        self.confidence = clamp_percentage(confidence);
        self.label = label_for(self.truth_pct, Some(self.confidence), bands);
    }

    /// Re-derive what the label should currently be
    pub fn derived_label(&self, bands: &BandConfig) -> VerdictLabel {
        label_for(self.truth_pct, Some(self.confidence), bands)
    }
}
