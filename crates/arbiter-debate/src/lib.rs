//! Arbiter Debate Engine
//!
//! Adversarial multi-step verdict pipeline: an advocate proposes
//! verdicts for an ordered claim set, a challenger objects, a reconciler
//! revises, and deterministic policy stages keep the result honest.
//!
//! ## Pipeline
//!
//! 1. Advocate verdicts (one model call)
//! 2. Self-consistency re-runs and adversarial challenge, concurrently
//! 3. Deterministic citation validation of challenges
//! 4. Reconciliation (flagship model call)
//! 5. Baseless-challenge enforcement (deterministic revert policy)
//! 6. Grounding and direction validation, concurrently, advisory only
//! 7. Structural consistency check
//! 8. High-harm confidence floor
//! 9. Confidence classification
//! 10. Optional range reporting
//!
//! The engine is generic over the injected [`ModelCall`] capability and
//! performs no network access of its own; all configuration arrives as
//! an explicit [`DebateConfig`] record.
//!
//! [`ModelCall`]: arbiter_domain::traits::ModelCall

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod engine;
pub mod enforcement;
pub mod error;
pub mod finalize;
pub mod parser;
pub mod prompt;
pub mod structural;
pub mod types;

pub use config::DebateConfig;
pub use engine::DebateEngine;
pub use error::DebateError;
pub use types::{
    DebateInput, DebateOutcome, ReconciledVerdict, TASK_ADVOCATE, TASK_CHALLENGE, TASK_RECONCILE,
    TASK_VALIDATE_DIRECTION, TASK_VALIDATE_GROUNDING,
};
