//! Arbiter Domain Layer
//!
//! This crate contains the data model and trait seams for the verdict
//! debate engine. It defines the fundamental concepts that all other
//! layers depend upon; infrastructure implementations (model callers,
//! reliability prefetch) live in other crates.
//!
//! ## Key Concepts
//!
//! - **AtomicClaim**: a single verifiable assertion, immutable once extracted
//! - **EvidenceItem**: an unverified statement with a direction relative to the thesis
//! - **AssessmentBoundary**: a cluster of evidence sharing a coherent methodology scope
//! - **ClaimVerdict**: the work-in-progress verdict record refined by each debate step
//! - **VerdictLabel**: the seven-point truth scale, derived from (truth%, confidence)
//! - **AnalysisWarning**: typed, severity-tagged diagnostics, append-only
//!
//! ## Architecture
//!
//! - Pure data and derivation logic only
//! - Trait definitions for all external interactions (`traits`)
//! - No network, no storage, no model calls

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod boundary;
pub mod challenge;
pub mod claim;
pub mod evidence;
pub mod scale;
pub mod traits;
pub mod verdict;
pub mod warning;

// Re-exports for convenience
pub use boundary::{AssessmentBoundary, BoundaryId, CoverageMatrix};
pub use challenge::{
    ChallengeDocument, ChallengePoint, ChallengeResponse, ChallengeSeverity, ChallengeType,
    CitationCheck,
};
pub use claim::{AtomicClaim, Centrality, ClaimId, HarmPotential};
pub use evidence::{EvidenceDirection, EvidenceId, EvidenceItem};
pub use scale::{clamp_percentage, clamp_truth_percentage, label_for, BandConfig, VerdictLabel};
pub use verdict::{
    BoundaryFinding, ClaimVerdict, ConfidenceTier, ConsistencyResult, TriangulationScore,
};
pub use warning::{AnalysisWarning, WarningKind, WarningSeverity};
