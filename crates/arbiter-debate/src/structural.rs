//! Structural consistency check
//!
//! Runs deterministically after enforcement, before finalization.
//! Violations here indicate upstream bugs, not runtime events, so they
//! are logged and recorded but never auto-healed.

use arbiter_domain::{
    AnalysisWarning, BoundaryId, ClaimVerdict, EvidenceId, WarningKind, WarningSeverity,
};
use arbiter_domain::scale::BandConfig;
use std::collections::HashSet;
use tracing::warn;

/// Check every verdict against the structural invariants
///
/// Verifies cited evidence ids exist, boundary ids exist, percentages
/// stay within [0, 100], and each stored label still matches its scale
/// derivation.
pub fn structural_check(
    verdicts: &[ClaimVerdict],
    evidence_ids: &HashSet<EvidenceId>,
    boundary_ids: &HashSet<BoundaryId>,
    bands: &BandConfig,
) -> Vec<AnalysisWarning> {
    let mut warnings = Vec::new();

    for verdict in verdicts {
        for cited in verdict
            .supporting_evidence
            .iter()
            .chain(verdict.contradicting_evidence.iter())
        {
            if !evidence_ids.contains(cited) {
                warn!(claim = %verdict.claim_id, evidence = %cited, "dangling evidence id");
                warnings.push(AnalysisWarning::for_claim(
                    WarningKind::DanglingEvidence,
                    WarningSeverity::Structural,
                    verdict.claim_id.clone(),
                    format!("cited evidence id '{}' is not in the pool", cited),
                ));
            }
        }

        for finding in &verdict.boundary_findings {
            if !boundary_ids.contains(&finding.boundary_id) {
                warn!(claim = %verdict.claim_id, boundary = %finding.boundary_id, "dangling boundary id");
                warnings.push(AnalysisWarning::for_claim(
                    WarningKind::DanglingBoundary,
                    WarningSeverity::Structural,
                    verdict.claim_id.clone(),
                    format!(
                        "finding references boundary id '{}' outside the cluster set",
                        finding.boundary_id
                    ),
                ));
            }
        }

        for (name, value) in [
            ("truth_pct", verdict.truth_pct),
            ("confidence", verdict.confidence),
        ] {
            if !value.is_finite() || !(0.0..=100.0).contains(&value) {
                warn!(claim = %verdict.claim_id, field = name, value, "percentage out of range");
                warnings.push(AnalysisWarning::for_claim(
                    WarningKind::OutOfRangePercentage,
                    WarningSeverity::Structural,
                    verdict.claim_id.clone(),
                    format!("{} is {} outside [0, 100]", name, value),
                ));
            }
        }

        let derived = verdict.derived_label(bands);
        if derived != verdict.label {
            warn!(
                claim = %verdict.claim_id,
                stored = %verdict.label,
                derived = %derived,
                "stored label disagrees with scale derivation"
            );
            warnings.push(AnalysisWarning::for_claim(
                WarningKind::LabelMismatch,
                WarningSeverity::Structural,
                verdict.claim_id.clone(),
                format!("stored label '{}' but derivation yields '{}'", verdict.label, derived),
            ));
        }
    }

    warnings
}
