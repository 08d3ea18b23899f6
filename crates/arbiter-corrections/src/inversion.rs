//! Inversion detection - verdicts whose polarity contradicts their own rationale
//!
//! Guards only verdicts scored at or above 50: a verdict already leaning
//! false cannot be "inverted" by a negative rationale, so it passes
//! through untouched.

use crate::patterns::PatternSet;
use tracing::debug;

/// A detected inversion and the corrected truth percentage
#[derive(Debug, Clone, PartialEq)]
pub struct InversionCorrection {
    /// `100 - original` truth percentage
    pub corrected_pct: f64,

    /// Why the verdict was flagged
    pub reason: String,
}

/// Detect a verdict whose score contradicts its rationale
///
/// Flags inversion when the claim asserts something positive while the
/// rationale negates it, or the claim asserts something negative while
/// the rationale shows positive evidence. Returns `None` when the
/// verdict passes through unchanged.
pub fn detect_inversion(
    claim_text: &str,
    rationale: &str,
    truth_pct: f64,
    patterns: &PatternSet,
) -> Option<InversionCorrection> {
    if !(truth_pct >= 50.0) {
        return None;
    }

    let claim_negated = patterns.is_negated(claim_text);
    let claim_positive = patterns.asserts_positive(claim_text);
    let rationale_negated = patterns.is_negated(rationale);
    let rationale_positive = patterns.asserts_positive(rationale);

    let reason = if claim_positive && rationale_negated {
        "claim asserts positively but rationale negates it"
    } else if claim_negated && rationale_positive {
        "claim asserts negatively but rationale shows positive evidence"
    } else {
        return None;
    };

    let corrected_pct = 100.0 - truth_pct;
    debug!(truth_pct, corrected_pct, reason, "inversion detected");

    Some(InversionCorrection {
        corrected_pct,
        reason: reason.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_claim_negated_rationale_inverts() {
        let patterns = PatternSet::default();
        let correction = detect_inversion(
            "The police response was proportionate",
            "Multiple reports establish the response was NOT proportionate to the threat",
            85.0,
            &patterns,
        )
        .expect("should detect inversion");

        assert_eq!(correction.corrected_pct, 15.0);
        assert!(correction.reason.contains("negates"));
    }

    #[test]
    fn test_negative_claim_positive_rationale_inverts() {
        let patterns = PatternSet::default();
        let correction = detect_inversion(
            "The vaccine never completed safety trials",
            "Trial records show all three phases were completed and the data confirmed safety",
            70.0,
            &patterns,
        );

        assert!(correction.is_some());
        assert_eq!(correction.unwrap().corrected_pct, 30.0);
    }

    #[test]
    fn test_low_scores_never_touched() {
        let patterns = PatternSet::default();
        // Same contradictory pair, but score below 50 passes through
        let correction = detect_inversion(
            "The police response was proportionate",
            "The response was NOT proportionate",
            49.9,
            &patterns,
        );
        assert!(correction.is_none());
    }

    #[test]
    fn test_agreeing_pair_passes_through() {
        let patterns = PatternSet::default();
        let correction = detect_inversion(
            "The reactor was shut down in 2019",
            "Operator filings show the reactor was shut down in April 2019",
            90.0,
            &patterns,
        );
        assert!(correction.is_none());
    }

    #[test]
    fn test_both_negated_passes_through() {
        let patterns = PatternSet::default();
        // Claim and rationale agree in the negative; no inversion
        let correction = detect_inversion(
            "The merger was not approved",
            "Regulators did not approve the merger",
            80.0,
            &patterns,
        );
        assert!(correction.is_none());
    }

    #[test]
    fn test_nan_score_passes_through() {
        let patterns = PatternSet::default();
        let correction = detect_inversion("claim", "rationale", f64::NAN, &patterns);
        assert!(correction.is_none());
    }
}
