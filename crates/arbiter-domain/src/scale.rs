//! Truth scale - converts a truth percentage into one of seven ordered verdict labels
//!
//! The 43-57 band is ambiguous by design: "net-neutral" can mean either a
//! confident mix of strong evidence on both sides (Mixed) or insufficient
//! evidence to judge (Unverified). Confidence disambiguates the two.

use serde::{Deserialize, Serialize};

/// The seven-point verdict scale
///
/// Mixed and Unverified occupy the same numeric band and are told apart
/// by confidence, so the enum has eight variants over seven bands.
/// Represented as a closed enumeration so exhaustive matches catch
/// missing cases at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VerdictLabel {
    /// Truth percentage >= true band threshold
    True,

    /// Mostly supported with minor inaccuracies
    MostlyTrue,

    /// More supported than not
    LeaningTrue,

    /// Net-neutral: strong evidence on both sides, judged with confidence
    Mixed,

    /// Net-neutral: insufficient evidence to judge
    Unverified,

    /// More contradicted than not
    LeaningFalse,

    /// Mostly contradicted with minor accurate elements
    MostlyFalse,

    /// Definitively contradicted
    False,
}

impl VerdictLabel {
    /// Get the label name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            VerdictLabel::True => "true",
            VerdictLabel::MostlyTrue => "mostly-true",
            VerdictLabel::LeaningTrue => "leaning-true",
            VerdictLabel::Mixed => "mixed",
            VerdictLabel::Unverified => "unverified",
            VerdictLabel::LeaningFalse => "leaning-false",
            VerdictLabel::MostlyFalse => "mostly-false",
            VerdictLabel::False => "false",
        }
    }

    /// Parse a label from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "true" => Some(VerdictLabel::True),
            "mostly-true" => Some(VerdictLabel::MostlyTrue),
            "leaning-true" => Some(VerdictLabel::LeaningTrue),
            "mixed" => Some(VerdictLabel::Mixed),
            "unverified" => Some(VerdictLabel::Unverified),
            "leaning-false" => Some(VerdictLabel::LeaningFalse),
            "mostly-false" => Some(VerdictLabel::MostlyFalse),
            "false" => Some(VerdictLabel::False),
            _ => None,
        }
    }

    /// Favorability rank: 7 = True down to 0 = False
    ///
    /// Mixed and Unverified share a rank because they share a band.
    pub fn favorability(&self) -> u8 {
        match self {
            VerdictLabel::True => 7,
            VerdictLabel::MostlyTrue => 6,
            VerdictLabel::LeaningTrue => 5,
            VerdictLabel::Mixed | VerdictLabel::Unverified => 4,
            VerdictLabel::LeaningFalse => 3,
            VerdictLabel::MostlyFalse => 2,
            VerdictLabel::False => 1,
        }
    }
}

impl std::fmt::Display for VerdictLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Injectable band thresholds for the truth scale
///
/// Pipeline configuration retunes these; nothing in the engine hard-codes
/// them. Thresholds are lower bounds for each band, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandConfig {
    /// Lower bound of the True band
    pub true_min: f64,

    /// Lower bound of the MostlyTrue band
    pub mostly_true_min: f64,

    /// Lower bound of the LeaningTrue band
    pub leaning_true_min: f64,

    /// Lower bound of the Mixed/Unverified band
    pub mixed_min: f64,

    /// Lower bound of the LeaningFalse band
    pub leaning_false_min: f64,

    /// Lower bound of the MostlyFalse band
    pub mostly_false_min: f64,

    /// Confidence at or above which the net-neutral band reads Mixed
    /// rather than Unverified; pipeline generations tune this in 40-60
    pub mixed_confidence_threshold: f64,
}

impl Default for BandConfig {
    fn default() -> Self {
        Self {
            true_min: 86.0,
            mostly_true_min: 72.0,
            leaning_true_min: 58.0,
            mixed_min: 43.0,
            leaning_false_min: 29.0,
            mostly_false_min: 15.0,
            mixed_confidence_threshold: 50.0,
        }
    }
}

/// Clamp any percentage to [0, 100]; non-finite input is neutral 50
pub fn clamp_percentage(value: f64) -> f64 {
    if !value.is_finite() {
        return 50.0;
    }
    value.clamp(0.0, 100.0)
}

/// Clamp a truth percentage to [0, 100]; non-finite input is neutral 50
pub fn clamp_truth_percentage(value: f64) -> f64 {
    clamp_percentage(value)
}

/// Normalize a percentage-like input: values in [0, 1] scale x100,
/// everything is clamped to [0, 100], non-finite defaults to 50
fn normalize(value: f64) -> f64 {
    if !value.is_finite() {
        return 50.0;
    }
    let scaled = if (0.0..=1.0).contains(&value) {
        value * 100.0
    } else {
        value
    };
    scaled.clamp(0.0, 100.0)
}

/// Derive the verdict label for a truth percentage
///
/// `confidence` disambiguates the net-neutral band; when absent it is
/// treated as neutral 50. Both inputs are normalized and clamped.
pub fn label_for(truth_pct: f64, confidence: Option<f64>, bands: &BandConfig) -> VerdictLabel {
    let pct = normalize(truth_pct);
    let conf = normalize(confidence.unwrap_or(50.0));

    if pct >= bands.true_min {
        VerdictLabel::True
    } else if pct >= bands.mostly_true_min {
        VerdictLabel::MostlyTrue
    } else if pct >= bands.leaning_true_min {
        VerdictLabel::LeaningTrue
    } else if pct >= bands.mixed_min {
        if conf >= bands.mixed_confidence_threshold {
            VerdictLabel::Mixed
        } else {
            VerdictLabel::Unverified
        }
    } else if pct >= bands.leaning_false_min {
        VerdictLabel::LeaningFalse
    } else if pct >= bands.mostly_false_min {
        VerdictLabel::MostlyFalse
    } else {
        VerdictLabel::False
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: favorability is monotonic non-increasing as truth decreases
        #[test]
        fn test_label_monotonic(a in 0.0f64..=100.0, b in 0.0f64..=100.0) {
            let bands = BandConfig::default();
            let (hi, lo) = if a >= b { (a, b) } else { (b, a) };

            let hi_label = label_for(hi, Some(80.0), &bands);
            let lo_label = label_for(lo, Some(80.0), &bands);

            prop_assert!(hi_label.favorability() >= lo_label.favorability(),
                "favorability must not increase as truth falls: {} -> {}", hi, lo);
        }

        /// Property: deriving the label twice from the same inputs is idempotent
        #[test]
        fn test_label_idempotent(pct in -50.0f64..=150.0, conf in 0.0f64..=100.0) {
            let bands = BandConfig::default();
            let first = label_for(pct, Some(conf), &bands);
            let second = label_for(pct, Some(conf), &bands);
            prop_assert_eq!(first, second);
        }

        /// Property: clamp always lands in [0, 100]
        #[test]
        fn test_clamp_range(value: f64) {
            let clamped = clamp_truth_percentage(value);
            prop_assert!((0.0..=100.0).contains(&clamped));
        }
    }
}
