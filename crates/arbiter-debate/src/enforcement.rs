//! Deterministic policy stages around reconciliation
//!
//! Citation checking and baseless-challenge enforcement are pure
//! existence checks against the real evidence pool; no model output is
//! trusted here. The hard policy: a verdict must never move away from
//! its evidence-grounded value because of an unfounded objection.

use arbiter_domain::{
    AnalysisWarning, ChallengeDocument, CitationCheck, ClaimVerdict, EvidenceId, WarningKind,
    WarningSeverity,
};
use std::collections::HashSet;
use tracing::{debug, info};

/// Mark every challenge point's cited evidence ids as valid or invalid
///
/// Pure existence check against the real pool; no semantic judgment.
pub fn apply_citation_checks(
    challenges: &mut ChallengeDocument,
    evidence_ids: &HashSet<EvidenceId>,
) {
    for point in &mut challenges.points {
        let mut check = CitationCheck::default();
        for cited in &point.cited_evidence {
            if evidence_ids.contains(cited) {
                check.valid.push(cited.clone());
            } else {
                check.invalid.push(cited.clone());
            }
        }
        debug!(
            point = %point.id,
            valid = check.valid.len(),
            invalid = check.invalid.len(),
            "citation check"
        );
        point.citation_check = Some(check);
    }
}

/// Enforce provenance on one reconciled verdict
///
/// A changed verdict whose provenance is missing, unresolvable, or made
/// up entirely of baseless challenge points is reverted bit-for-bit to
/// its pre-reconciliation baseline. A mix of grounded and baseless
/// provenance keeps the change but earns an advisory warning.
pub fn enforce_provenance(
    verdict: &mut ClaimVerdict,
    baseline: &ClaimVerdict,
    challenges: &ChallengeDocument,
) -> Vec<AnalysisWarning> {
    let unchanged =
        verdict.truth_pct == baseline.truth_pct && verdict.confidence == baseline.confidence;
    if unchanged {
        return Vec::new();
    }

    let cited_ids: Vec<&String> = verdict
        .challenge_responses
        .iter()
        .filter(|response| response.verdict_changed)
        .flat_map(|response| response.challenge_point_ids.iter())
        .collect();

    if cited_ids.is_empty() {
        info!(claim = %verdict.claim_id, "verdict changed without provenance; reverting");
        let warning = AnalysisWarning::for_claim(
            WarningKind::BaselessChallengeReverted,
            WarningSeverity::Policy,
            verdict.claim_id.clone(),
            "reconciled change carried no challenge-point provenance; reverted",
        );
        *verdict = baseline.clone();
        return vec![warning];
    }

    let mut grounded = 0usize;
    let mut baseless = 0usize;
    for id in &cited_ids {
        match challenges.point(id) {
            Some(point)
                if point
                    .citation_check
                    .as_ref()
                    .is_some_and(CitationCheck::has_valid_citation) =>
            {
                grounded += 1;
            }
            // Unresolvable ids count as baseless, same as uncited points
            _ => baseless += 1,
        }
    }

    if grounded == 0 {
        info!(claim = %verdict.claim_id, baseless, "provenance entirely baseless; reverting");
        let warning = AnalysisWarning::for_claim(
            WarningKind::BaselessChallengeReverted,
            WarningSeverity::Policy,
            verdict.claim_id.clone(),
            format!(
                "all {} cited challenge points lack valid evidence; reverted to advocate values",
                baseless
            ),
        );
        *verdict = baseline.clone();
        return vec![warning];
    }

    if baseless > 0 {
        return vec![AnalysisWarning::for_claim(
            WarningKind::MixedProvenance,
            WarningSeverity::Advisory,
            verdict.claim_id.clone(),
            format!(
                "change kept: {} grounded challenge points, but {} baseless",
                grounded, baseless
            ),
        )];
    }

    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbiter_domain::{
        BandConfig, ChallengePoint, ChallengeResponse, ChallengeSeverity, ChallengeType, ClaimId,
        HarmPotential,
    };

    fn verdict(truth: f64, confidence: f64) -> ClaimVerdict {
        ClaimVerdict::new(
            ClaimId::from("c1"),
            truth,
            confidence,
            "advocate rationale",
            HarmPotential::Low,
            &BandConfig::default(),
        )
    }

    fn point(id: &str, cited: &[&str]) -> ChallengePoint {
        ChallengePoint {
            id: id.to_string(),
            claim_id: ClaimId::from("c1"),
            challenge_type: ChallengeType::MissingEvidence,
            severity: ChallengeSeverity::High,
            description: "objection".to_string(),
            cited_evidence: cited.iter().map(|&e| EvidenceId::from(e)).collect(),
            citation_check: None,
        }
    }

    fn response(ids: &[&str]) -> ChallengeResponse {
        ChallengeResponse {
            challenge_point_ids: ids.iter().map(|&s| s.to_string()).collect(),
            verdict_changed: true,
            reply: "accepted".to_string(),
        }
    }

    #[test]
    fn test_citation_checks_partition_ids() {
        let mut doc = ChallengeDocument {
            points: vec![point("cp1", &["e1", "ghost"])],
        };
        let pool: HashSet<EvidenceId> = [EvidenceId::from("e1")].into();

        apply_citation_checks(&mut doc, &pool);

        let check = doc.points[0].citation_check.as_ref().unwrap();
        assert_eq!(check.valid, vec![EvidenceId::from("e1")]);
        assert_eq!(check.invalid, vec![EvidenceId::from("ghost")]);
    }

    #[test]
    fn test_unchanged_verdict_untouched() {
        let baseline = verdict(80.0, 70.0);
        let mut current = baseline.clone();
        let warnings = enforce_provenance(&mut current, &baseline, &ChallengeDocument::default());
        assert!(warnings.is_empty());
        assert_eq!(current, baseline);
    }

    #[test]
    fn test_baseless_provenance_reverts_bit_for_bit() {
        let baseline = verdict(80.0, 70.0);
        let mut doc = ChallengeDocument {
            points: vec![point("cp1", &["ghost"])],
        };
        apply_citation_checks(&mut doc, &HashSet::new());

        let mut current = baseline.clone();
        current.set_scores(40.0, 50.0, &BandConfig::default());
        current.challenge_responses = vec![response(&["cp1"])];

        let warnings = enforce_provenance(&mut current, &baseline, &doc);
        assert_eq!(current, baseline);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, WarningKind::BaselessChallengeReverted);
        assert_eq!(warnings[0].severity, WarningSeverity::Policy);
    }

    #[test]
    fn test_missing_provenance_reverts() {
        let baseline = verdict(80.0, 70.0);
        let mut current = baseline.clone();
        current.set_scores(40.0, 50.0, &BandConfig::default());

        let warnings = enforce_provenance(&mut current, &baseline, &ChallengeDocument::default());
        assert_eq!(current, baseline);
        assert_eq!(warnings[0].kind, WarningKind::BaselessChallengeReverted);
    }

    #[test]
    fn test_unresolvable_provenance_reverts() {
        let baseline = verdict(80.0, 70.0);
        let mut current = baseline.clone();
        current.set_scores(40.0, 50.0, &BandConfig::default());
        current.challenge_responses = vec![response(&["cp-nonexistent"])];

        let warnings = enforce_provenance(&mut current, &baseline, &ChallengeDocument::default());
        assert_eq!(current, baseline);
        assert_eq!(warnings[0].kind, WarningKind::BaselessChallengeReverted);
    }

    #[test]
    fn test_mixed_provenance_keeps_change_with_advisory() {
        let baseline = verdict(80.0, 70.0);
        let mut doc = ChallengeDocument {
            points: vec![point("cp1", &["e1"]), point("cp2", &["ghost"])],
        };
        let pool: HashSet<EvidenceId> = [EvidenceId::from("e1")].into();
        apply_citation_checks(&mut doc, &pool);

        let mut current = baseline.clone();
        current.set_scores(60.0, 65.0, &BandConfig::default());
        current.challenge_responses = vec![response(&["cp1", "cp2"])];

        let warnings = enforce_provenance(&mut current, &baseline, &doc);
        assert_eq!(current.truth_pct, 60.0);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, WarningKind::MixedProvenance);
        assert_eq!(warnings[0].severity, WarningSeverity::Advisory);
    }

    #[test]
    fn test_fully_grounded_change_is_silent() {
        let baseline = verdict(80.0, 70.0);
        let mut doc = ChallengeDocument {
            points: vec![point("cp1", &["e1"])],
        };
        let pool: HashSet<EvidenceId> = [EvidenceId::from("e1")].into();
        apply_citation_checks(&mut doc, &pool);

        let mut current = baseline.clone();
        current.set_scores(60.0, 65.0, &BandConfig::default());
        current.challenge_responses = vec![response(&["cp1"])];

        let warnings = enforce_provenance(&mut current, &baseline, &doc);
        assert!(warnings.is_empty());
        assert_eq!(current.truth_pct, 60.0);
    }
}
