//! Finalization stages: harm floor, confidence tier, range reporting

use crate::config::DebateConfig;
use arbiter_domain::scale::clamp_truth_percentage;
use arbiter_domain::verdict::ConfidenceTier;
use arbiter_domain::{AnalysisWarning, ClaimVerdict, VerdictLabel, WarningKind, WarningSeverity};
use tracing::info;

/// Apply the high-harm confidence floor to one verdict
///
/// A directional, confident-sounding verdict on a high-harm topic must
/// never be issued on thin evidence, so the label is forced to
/// Unverified regardless of the truth percentage. This is the one place
/// a stored label deliberately departs from its scale derivation; the
/// structural check runs before this stage for exactly that reason.
pub fn apply_harm_floor(
    verdict: &mut ClaimVerdict,
    config: &DebateConfig,
) -> Option<AnalysisWarning> {
    if config.harm_floor <= 0.0 {
        return None;
    }
    if !config.high_harm_tiers.contains(&verdict.harm) {
        return None;
    }
    if verdict.confidence >= config.harm_floor {
        return None;
    }

    info!(
        claim = %verdict.claim_id,
        harm = verdict.harm.as_str(),
        confidence = verdict.confidence,
        floor = config.harm_floor,
        "harm floor downgraded verdict to unverified"
    );
    verdict.label = VerdictLabel::Unverified;

    Some(AnalysisWarning::for_claim(
        WarningKind::HarmFloorApplied,
        WarningSeverity::Policy,
        verdict.claim_id.clone(),
        format!(
            "{} harm with confidence {} below floor {}; label forced to unverified",
            verdict.harm.as_str(),
            verdict.confidence,
            config.harm_floor
        ),
    ))
}

/// Attach the informational confidence tier (Gate 4)
pub fn attach_confidence_tier(verdict: &mut ClaimVerdict) {
    verdict.confidence_tier = Some(ConfidenceTier::classify(verdict.confidence));
}

/// Compute the plausible truth-percentage interval for one verdict
///
/// Built from the self-consistency run's min/max, optionally widened by
/// cross-boundary variance. Skipped entirely when range reporting is
/// disabled or the consistency check did not run.
pub fn apply_range_reporting(
    verdict: &mut ClaimVerdict,
    config: &DebateConfig,
) -> Option<AnalysisWarning> {
    if !config.range_reporting {
        return None;
    }
    if !verdict.consistency.assessed || verdict.consistency.observed_pcts.is_empty() {
        return None;
    }

    let observed = &verdict.consistency.observed_pcts;
    let min = observed.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = observed.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if !min.is_finite() || !max.is_finite() {
        return None;
    }

    let widening = boundary_spread(verdict) * config.range_variance_weight / 2.0;
    let low = clamp_truth_percentage(min - widening);
    let high = clamp_truth_percentage(max + widening);
    verdict.truth_range = Some((low, high));

    let width = high - low;
    if width > config.max_range_width {
        return Some(AnalysisWarning::for_claim(
            WarningKind::WideRange,
            WarningSeverity::Advisory,
            verdict.claim_id.clone(),
            format!(
                "plausible truth range [{}, {}] exceeds width {}",
                low, high, config.max_range_width
            ),
        ));
    }

    None
}

fn boundary_spread(verdict: &ClaimVerdict) -> f64 {
    if verdict.boundary_findings.len() < 2 {
        return 0.0;
    }
    let truths: Vec<f64> = verdict
        .boundary_findings
        .iter()
        .map(|finding| finding.truth_pct)
        .collect();
    let min = truths.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = truths.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    max - min
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbiter_domain::scale::BandConfig;
    use arbiter_domain::verdict::{BoundaryFinding, ConsistencyResult};
    use arbiter_domain::{BoundaryId, ClaimId, EvidenceDirection, HarmPotential};

    fn verdict(truth: f64, confidence: f64, harm: HarmPotential) -> ClaimVerdict {
        ClaimVerdict::new(
            ClaimId::from("c1"),
            truth,
            confidence,
            "",
            harm,
            &BandConfig::default(),
        )
    }

    #[test]
    fn test_harm_floor_forces_unverified() {
        let config = DebateConfig::default();
        let mut v = verdict(90.0, 30.0, HarmPotential::Critical);

        let warning = apply_harm_floor(&mut v, &config).expect("floor should apply");
        assert_eq!(v.label, VerdictLabel::Unverified);
        assert_eq!(v.truth_pct, 90.0);
        assert_eq!(warning.kind, WarningKind::HarmFloorApplied);
        assert_eq!(warning.severity, WarningSeverity::Policy);
    }

    #[test]
    fn test_harm_floor_skips_low_harm() {
        let config = DebateConfig::default();
        let mut v = verdict(90.0, 30.0, HarmPotential::Low);
        assert!(apply_harm_floor(&mut v, &config).is_none());
        assert_ne!(v.label, VerdictLabel::Unverified);
    }

    #[test]
    fn test_harm_floor_disabled_at_zero() {
        let mut config = DebateConfig::default();
        config.harm_floor = 0.0;
        let mut v = verdict(90.0, 10.0, HarmPotential::Critical);
        assert!(apply_harm_floor(&mut v, &config).is_none());
    }

    #[test]
    fn test_harm_floor_skips_confident_verdicts() {
        let config = DebateConfig::default();
        let mut v = verdict(90.0, 75.0, HarmPotential::Critical);
        assert!(apply_harm_floor(&mut v, &config).is_none());
    }

    #[test]
    fn test_confidence_tier_attachment() {
        let mut v = verdict(80.0, 80.0, HarmPotential::Low);
        attach_confidence_tier(&mut v);
        assert_eq!(v.confidence_tier, Some(ConfidenceTier::High));
    }

    #[test]
    fn test_range_reporting_disabled_by_default() {
        let config = DebateConfig::default();
        let mut v = verdict(80.0, 70.0, HarmPotential::Low);
        v.consistency = ConsistencyResult::from_observations(vec![80.0, 40.0, 95.0], 5.0);

        assert!(apply_range_reporting(&mut v, &config).is_none());
        assert!(v.truth_range.is_none());
    }

    #[test]
    fn test_range_from_consistency_min_max() {
        let mut config = DebateConfig::default();
        config.range_reporting = true;

        let mut v = verdict(80.0, 70.0, HarmPotential::Low);
        v.consistency = ConsistencyResult::from_observations(vec![78.0, 74.0, 85.0], 5.0);

        let warning = apply_range_reporting(&mut v, &config);
        assert_eq!(v.truth_range, Some((74.0, 85.0)));
        // Width 11 stays under the default 30
        assert!(warning.is_none());
    }

    #[test]
    fn test_wide_range_warned() {
        let mut config = DebateConfig::default();
        config.range_reporting = true;

        let mut v = verdict(80.0, 70.0, HarmPotential::Low);
        v.consistency = ConsistencyResult::from_observations(vec![80.0, 40.0, 95.0], 5.0);

        let warning = apply_range_reporting(&mut v, &config).expect("width 55 exceeds 30");
        assert_eq!(v.truth_range, Some((40.0, 95.0)));
        assert_eq!(warning.kind, WarningKind::WideRange);
    }

    #[test]
    fn test_variance_widening() {
        let mut config = DebateConfig::default();
        config.range_reporting = true;
        config.range_variance_weight = 0.5;

        let mut v = verdict(80.0, 70.0, HarmPotential::Low);
        v.consistency = ConsistencyResult::from_observations(vec![78.0, 74.0, 82.0], 5.0);
        v.boundary_findings = vec![
            BoundaryFinding {
                boundary_id: BoundaryId::from("b1"),
                truth_pct: 90.0,
                confidence: 70.0,
                direction: EvidenceDirection::Supports,
            },
            BoundaryFinding {
                boundary_id: BoundaryId::from("b2"),
                truth_pct: 70.0,
                confidence: 70.0,
                direction: EvidenceDirection::Supports,
            },
        ];

        apply_range_reporting(&mut v, &config);
        // Boundary spread 20 at weight 0.5 widens each side by 5
        assert_eq!(v.truth_range, Some((69.0, 87.0)));
    }

    #[test]
    fn test_skipped_consistency_yields_no_range() {
        let mut config = DebateConfig::default();
        config.range_reporting = true;

        let mut v = verdict(80.0, 70.0, HarmPotential::Low);
        assert!(apply_range_reporting(&mut v, &config).is_none());
        assert!(v.truth_range.is_none());
    }
}
