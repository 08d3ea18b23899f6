//! Evidence weighting formulas
//!
//! Documented invariant, kept exact for test parity:
//!
//! ```text
//! effectiveWeight = 0.5 + (score - 0.5) * SPREAD * confidence * consensusMultiplier
//! adjustedTruth = round(50 + (originalTruth - 50) * avgWeight)
//! adjustedConfidence = round(originalConfidence * (0.5 + avgWeight / 2))
//! ```
//!
//! An unknown source is treated as neutral (score 0.5, confidence 0.5,
//! no consensus) - an explicit policy decision, not an accidental default.

use arbiter_domain::scale::{clamp_percentage, clamp_truth_percentage, BandConfig};
use arbiter_domain::traits::ReliabilitySource;
use arbiter_domain::{ClaimVerdict, EvidenceId, EvidenceItem};
use std::collections::HashMap;
use tracing::debug;

/// How far a reliability score can pull the weight away from neutral
const SPREAD: f64 = 1.5;

/// Confidence in a reliability score when unspecified
const DEFAULT_SCORE_CONFIDENCE: f64 = 0.7;

/// Weight boost when multi-model consensus was reached on the score
const CONSENSUS_MULTIPLIER: f64 = 1.15;

/// Neutral weight: the adjustment is a half-strength pull toward 50
const NEUTRAL_WEIGHT: f64 = 0.5;

/// Effective weight of one source's reliability score
///
/// `score` of `None` means the source is unknown and reads as neutral
/// regardless of the other arguments. `confidence` is confidence in the
/// score itself and defaults to 0.7 when unspecified.
pub fn effective_weight(score: Option<f64>, confidence: Option<f64>, consensus: bool) -> f64 {
    let (score, confidence, consensus) = match score {
        Some(score) => (score, confidence.unwrap_or(DEFAULT_SCORE_CONFIDENCE), consensus),
        // Unknown-source policy: neutral score, halved confidence, no consensus
        None => (0.5, 0.5, false),
    };

    let multiplier = if consensus { CONSENSUS_MULTIPLIER } else { 1.0 };
    NEUTRAL_WEIGHT + (score - 0.5) * SPREAD * confidence * multiplier
}

/// Result of applying evidence weighting to one verdict
#[derive(Debug, Clone, PartialEq)]
pub struct WeightingOutcome {
    /// The (possibly) adjusted verdict
    pub verdict: ClaimVerdict,

    /// Average effective weight over qualifying supporting evidence,
    /// `None` when no evidence qualified and the verdict passed through
    pub avg_weight: Option<f64>,
}

/// Apply source-reliability weighting to a verdict
///
/// Averages the effective weights of the sources behind the verdict's
/// supporting evidence, then pulls truth toward or away from 50 and
/// scales confidence accordingly, re-deriving the label.
///
/// A verdict with zero qualifying supporting evidence ids is returned
/// unchanged: absence of evidence must not silently alter a verdict.
pub fn apply_weighting(
    verdict: &ClaimVerdict,
    evidence: &[EvidenceItem],
    reliability: &dyn ReliabilitySource,
    consensus: bool,
    bands: &BandConfig,
) -> WeightingOutcome {
    let by_id: HashMap<&EvidenceId, &EvidenceItem> =
        evidence.iter().map(|item| (&item.id, item)).collect();

    let weights: Vec<f64> = verdict
        .supporting_evidence
        .iter()
        .filter_map(|id| by_id.get(id))
        .map(|item| {
            let score = item
                .source_domain
                .as_deref()
                .and_then(|domain| reliability.score_for_domain(domain));
            effective_weight(score, None, consensus)
        })
        .collect();

    if weights.is_empty() {
        return WeightingOutcome {
            verdict: verdict.clone(),
            avg_weight: None,
        };
    }

    let avg_weight = weights.iter().sum::<f64>() / weights.len() as f64;

    let original_truth = clamp_truth_percentage(verdict.truth_pct);
    let original_confidence = clamp_percentage(verdict.confidence);

    let adjusted_truth =
        clamp_truth_percentage((50.0 + (original_truth - 50.0) * avg_weight).round());
    let adjusted_confidence =
        clamp_percentage((original_confidence * (0.5 + avg_weight / 2.0)).round());

    debug!(
        claim = %verdict.claim_id,
        avg_weight,
        truth = adjusted_truth,
        confidence = adjusted_confidence,
        "applied evidence weighting"
    );

    let mut adjusted = verdict.clone();
    adjusted.set_scores(adjusted_truth, adjusted_confidence, bands);

    WeightingOutcome {
        verdict: adjusted,
        avg_weight: Some(avg_weight),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbiter_domain::{
        AtomicClaim, Centrality, ClaimId, EvidenceDirection, HarmPotential, VerdictLabel,
    };
    use crate::ReliabilityCache;

    fn verdict(truth: f64, confidence: f64, supporting: &[&str]) -> ClaimVerdict {
        let mut v = ClaimVerdict::new(
            ClaimId::from("c1"),
            truth,
            confidence,
            "test rationale",
            HarmPotential::Low,
            &BandConfig::default(),
        );
        v.supporting_evidence = supporting.iter().map(|id| EvidenceId::from(*id)).collect();
        v
    }

    fn item(id: &str, domain: Option<&str>) -> EvidenceItem {
        let mut item = EvidenceItem::new(id, "statement", EvidenceDirection::Supports);
        item.source_domain = domain.map(String::from);
        item
    }

    #[test]
    fn test_unknown_source_is_neutral() {
        assert_eq!(effective_weight(None, None, false), 0.5);
        // Confidence and consensus are ignored for unknown sources
        assert_eq!(effective_weight(None, Some(0.9), true), 0.5);
    }

    #[test]
    fn test_effective_weight_formula() {
        // 0.5 + 0.45 * 1.5 * 0.7 = 0.9725
        let w = effective_weight(Some(0.95), None, false);
        assert!((w - 0.9725).abs() < 1e-9);

        // 0.5 + (-0.2) * 1.5 * 0.7 = 0.29
        let w = effective_weight(Some(0.3), None, false);
        assert!((w - 0.29).abs() < 1e-9);

        // Consensus boost
        let w = effective_weight(Some(0.9), Some(1.0), true);
        assert!((w - (0.5 + 0.4 * 1.5 * 1.15)).abs() < 1e-9);
    }

    #[test]
    fn test_neutral_weight_pulls_toward_fifty() {
        // Unknown source: weight 0.5, truth 75 -> round(50 + 25 * 0.5) = 63
        let cache = ReliabilityCache::new();
        let v = verdict(75.0, 50.0, &["e1"]);
        let pool = vec![item("e1", None)];

        let outcome = apply_weighting(&v, &pool, &cache, false, &BandConfig::default());
        assert_eq!(outcome.verdict.truth_pct, 63.0);
        assert_eq!(outcome.avg_weight, Some(0.5));
    }

    #[test]
    fn test_strong_source_preserves_truth() {
        // Score 0.95 -> weight 0.9725, truth 80 -> round(50 + 30 * 0.9725) = 79
        let cache = ReliabilityCache::from_scores([("stats.gov", Some(0.95))]);
        let v = verdict(80.0, 50.0, &["e1"]);
        let pool = vec![item("e1", Some("stats.gov"))];

        let outcome = apply_weighting(&v, &pool, &cache, false, &BandConfig::default());
        assert_eq!(outcome.verdict.truth_pct, 79.0);
    }

    #[test]
    fn test_weak_source_pulls_down() {
        // Score 0.3 -> weight 0.29, truth 80 -> round(50 + 30 * 0.29) = 59
        let cache = ReliabilityCache::from_scores([("blog.example", Some(0.3))]);
        let v = verdict(80.0, 50.0, &["e1"]);
        let pool = vec![item("e1", Some("blog.example"))];

        let outcome = apply_weighting(&v, &pool, &cache, false, &BandConfig::default());
        assert_eq!(outcome.verdict.truth_pct, 59.0);
    }

    #[test]
    fn test_multiple_sources_average() {
        // Scores 0.9 and 0.5 -> weights 0.92 and 0.5 -> avg 0.71
        // truth 80 -> round(50 + 30 * 0.71) = 71
        let cache = ReliabilityCache::from_scores([
            ("stats.gov", Some(0.9)),
            ("wiki.example", Some(0.5)),
        ]);
        let v = verdict(80.0, 50.0, &["e1", "e2"]);
        let pool = vec![item("e1", Some("stats.gov")), item("e2", Some("wiki.example"))];

        let outcome = apply_weighting(&v, &pool, &cache, false, &BandConfig::default());
        let avg = outcome.avg_weight.unwrap();
        assert!((avg - 0.71).abs() < 1e-9);
        assert_eq!(outcome.verdict.truth_pct, 71.0);
    }

    #[test]
    fn test_confidence_adjustment() {
        // Weight 0.92: confidence 80 -> round(80 * (0.5 + 0.46)) = 77
        let cache = ReliabilityCache::from_scores([("stats.gov", Some(0.9))]);
        let v = verdict(80.0, 80.0, &["e1"]);
        let pool = vec![item("e1", Some("stats.gov"))];

        let outcome = apply_weighting(&v, &pool, &cache, false, &BandConfig::default());
        assert_eq!(outcome.verdict.confidence, 77.0);
    }

    #[test]
    fn test_unscored_domain_reads_as_neutral() {
        // Domain present but never scored: the item still qualifies and
        // pulls with the neutral weight, it is not a no-op
        let cache = ReliabilityCache::new();
        let v = verdict(75.0, 50.0, &["e1"]);
        let pool = vec![item("e1", Some("unscored.example"))];

        let outcome = apply_weighting(&v, &pool, &cache, false, &BandConfig::default());
        assert_eq!(outcome.avg_weight, Some(0.5));
        assert_eq!(outcome.verdict.truth_pct, 63.0);
    }

    #[test]
    fn test_no_qualifying_evidence_is_exact_noop() {
        let cache = ReliabilityCache::from_scores([("stats.gov", Some(0.9))]);

        // No supporting ids at all
        let v = verdict(75.0, 60.0, &[]);
        let outcome = apply_weighting(&v, &[], &cache, false, &BandConfig::default());
        assert_eq!(outcome.verdict, v);
        assert_eq!(outcome.avg_weight, None);

        // Supporting ids that resolve to nothing in the pool
        let v = verdict(75.0, 60.0, &["ghost"]);
        let outcome = apply_weighting(&v, &[], &cache, false, &BandConfig::default());
        assert_eq!(outcome.verdict, v);
        assert_eq!(outcome.avg_weight, None);
    }

    #[test]
    fn test_label_rederived_after_adjustment() {
        // Weak source drags 80 down to 59: LeaningTrue band
        let cache = ReliabilityCache::from_scores([("blog.example", Some(0.3))]);
        let v = verdict(80.0, 80.0, &["e1"]);
        assert_eq!(v.label, VerdictLabel::MostlyTrue);
        let pool = vec![item("e1", Some("blog.example"))];

        let outcome = apply_weighting(&v, &pool, &cache, false, &BandConfig::default());
        assert_eq!(outcome.verdict.label, VerdictLabel::LeaningTrue);
    }

    #[test]
    fn test_claim_fields_not_touched() {
        let cache = ReliabilityCache::new();
        let claim = AtomicClaim::new("c1", "text", Centrality::High, HarmPotential::Low);
        let v = verdict(75.0, 50.0, &["e1"]);
        let pool = vec![item("e1", None)];

        let outcome = apply_weighting(&v, &pool, &cache, false, &BandConfig::default());
        assert_eq!(outcome.verdict.claim_id, claim.id);
        assert_eq!(outcome.verdict.rationale, v.rationale);
        assert_eq!(outcome.verdict.supporting_evidence, v.supporting_evidence);
    }
}
