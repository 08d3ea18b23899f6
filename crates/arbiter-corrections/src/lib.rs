//! Arbiter Verdict Corrections
//!
//! Two independent heuristics applied to generated verdicts:
//!
//! - **Inversion detection**: finds verdicts whose polarity contradicts
//!   their own stated rationale and flips the truth percentage.
//! - **Counter-claim detection**: decides whether a generated sub-claim
//!   is actually arguing the opposite of the user's original thesis,
//!   using comparative-sentence parsing, evaluative-polarity matching,
//!   and a guarded evidence-direction fallback.
//!
//! Both heuristics are driven by a swappable [`PatternSet`] so the
//! lexicon is configuration, not hard-coded literals at call sites.

#![warn(missing_docs)]

pub mod counterclaim;
pub mod inversion;
pub mod patterns;

pub use counterclaim::{assess_counter_claim, CounterClaimAssessment, CounterClaimFinding};
pub use inversion::{detect_inversion, InversionCorrection};
pub use patterns::{ComparativeFrame, EvaluativeFamily, PatternSet, Polarity};
