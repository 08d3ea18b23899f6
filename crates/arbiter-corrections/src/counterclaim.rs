//! Counter-claim detection - does a generated sub-claim argue the
//! opposite of the user's original thesis?
//!
//! Check order matters: alignment early-exits come first so that a
//! thesis-aligned claim is never flagged, regardless of what its
//! evidence looks like. The evidence-direction fallback runs last and
//! only under guards, because a claim's cited evidence can legitimately
//! include refuting material even when the claim agrees with the thesis.

use crate::patterns::{ComparativeFrame, PatternSet};
use arbiter_domain::{EvidenceDirection, EvidenceItem};
use tracing::debug;

/// Truth percentage at or above which a claim counts as clearly high
const CLEARLY_HIGH_TRUTH: f64 = 58.0;

/// Truth percentage at or below which a claim counts as clearly low
const CLEARLY_LOW_TRUTH: f64 = 42.0;

/// Which check decided the assessment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterClaimFinding {
    /// Thesis and claim use the same evaluative framing; never a counter-claim
    AlignedFraming,

    /// The claim's comparative frame supports the thesis's conclusion
    AlignedComparative,

    /// Comparator inverted or subjects swapped against the thesis
    InvertedComparative,

    /// Same evaluative term family used with opposite polarity
    OppositePolarity,

    /// Guarded fallback: confident claim whose supporting evidence
    /// points the opposite way relative to the thesis
    EvidenceFallback,

    /// No check fired
    NoSignal,
}

/// Outcome of counter-claim detection
#[derive(Debug, Clone, PartialEq)]
pub struct CounterClaimAssessment {
    /// Whether the claim argues the opposite of the thesis
    pub is_counter_claim: bool,

    /// Which check decided it
    pub finding: CounterClaimFinding,
}

impl CounterClaimAssessment {
    fn counter(finding: CounterClaimFinding) -> Self {
        Self {
            is_counter_claim: true,
            finding,
        }
    }

    fn aligned(finding: CounterClaimFinding) -> Self {
        Self {
            is_counter_claim: false,
            finding,
        }
    }
}

/// Decide whether a generated sub-claim argues the opposite of the thesis
///
/// `supporting_evidence` is the resolved evidence the claim cites in
/// support; `truth_pct` is the claim's own current truth percentage.
pub fn assess_counter_claim(
    thesis: &str,
    claim_text: &str,
    supporting_evidence: &[EvidenceItem],
    truth_pct: f64,
    patterns: &PatternSet,
) -> CounterClaimAssessment {
    // 1. Early exit: same evaluative framing in thesis and claim
    let mut opposite_polarity_family = None;
    for family in &patterns.families {
        let thesis_polarity = patterns.family_polarity(thesis, family);
        let claim_polarity = patterns.family_polarity(claim_text, family);
        if let (Some(tp), Some(cp)) = (thesis_polarity, claim_polarity) {
            if tp == cp {
                debug!(family = %family.core, "shared evaluative framing; not a counter-claim");
                return CounterClaimAssessment::aligned(CounterClaimFinding::AlignedFraming);
            }
            opposite_polarity_family.get_or_insert(family.core.clone());
        }
    }

    // 1b. Early exit: the claim's comparative frame backs the thesis's
    // conclusion (same winner, same loser, any evaluative dimension)
    let thesis_frames = patterns.comparative_frames(thesis);
    let claim_frames = patterns.comparative_frames(claim_text);
    for tf in &thesis_frames {
        for cf in &claim_frames {
            if frames_aligned(tf, cf, patterns) {
                debug!("claim frame supports thesis conclusion; not a counter-claim");
                return CounterClaimAssessment::aligned(CounterClaimFinding::AlignedComparative);
            }
        }
    }

    // 2. Comparative inversion: winner and loser trade places on the
    // same evaluative dimension
    for tf in &thesis_frames {
        for cf in &claim_frames {
            if frames_reversed(tf, cf, patterns) {
                debug!("comparative frame reversed against thesis");
                return CounterClaimAssessment::counter(CounterClaimFinding::InvertedComparative);
            }
        }
    }

    // 3. Evaluative polarity: same term family, opposite polarity
    if let Some(family) = opposite_polarity_family {
        debug!(family = %family, "opposite evaluative polarity");
        return CounterClaimAssessment::counter(CounterClaimFinding::OppositePolarity);
    }

    // 4. Guarded evidence fallback: only for clearly-scored claims whose
    // supporting evidence majority opposes the thesis direction
    let clearly_high = truth_pct >= CLEARLY_HIGH_TRUTH;
    let clearly_low = truth_pct <= CLEARLY_LOW_TRUTH;
    if clearly_high || clearly_low {
        if let Some(majority) = majority_direction(supporting_evidence) {
            let counter = (clearly_high && majority == EvidenceDirection::Contradicts)
                || (clearly_low && majority == EvidenceDirection::Supports);
            if counter {
                debug!(truth_pct, "evidence-direction fallback fired");
                return CounterClaimAssessment::counter(CounterClaimFinding::EvidenceFallback);
            }
        }
    }

    CounterClaimAssessment::aligned(CounterClaimFinding::NoSignal)
}

/// Same winner and same loser: the claim ranks the subjects the way the
/// thesis does
fn frames_aligned(tf: &ComparativeFrame, cf: &ComparativeFrame, patterns: &PatternSet) -> bool {
    patterns.subjects_match(&tf.winner, &cf.winner) && patterns.subjects_match(&tf.loser, &cf.loser)
}

/// Winner and loser trade places on the same evaluative dimension
///
/// Covers both an inverted comparator with matching subjects and
/// swapped subjects with the same comparator; a double inversion
/// normalizes back to the same winner and is handled by alignment.
fn frames_reversed(tf: &ComparativeFrame, cf: &ComparativeFrame, patterns: &PatternSet) -> bool {
    tf.adjective == cf.adjective
        && patterns.subjects_match(&tf.winner, &cf.loser)
        && patterns.subjects_match(&tf.loser, &cf.winner)
}

/// Strict majority direction among non-neutral supporting evidence
fn majority_direction(evidence: &[EvidenceItem]) -> Option<EvidenceDirection> {
    let supports = evidence
        .iter()
        .filter(|e| e.direction == EvidenceDirection::Supports)
        .count();
    let contradicts = evidence
        .iter()
        .filter(|e| e.direction == EvidenceDirection::Contradicts)
        .count();

    if supports == 0 && contradicts == 0 {
        None
    } else if supports > contradicts {
        Some(EvidenceDirection::Supports)
    } else if contradicts > supports {
        Some(EvidenceDirection::Contradicts)
    } else {
        None
    }
}
