//! Input and output records for one debate run

use arbiter_domain::{
    AnalysisWarning, AssessmentBoundary, AtomicClaim, BoundaryId, ChallengeResponse, ClaimId,
    ClaimVerdict, CoverageMatrix, EvidenceId, EvidenceItem,
};
use std::collections::HashSet;

/// Task identifier for the advocate call (and its consistency re-runs)
pub const TASK_ADVOCATE: &str = "debate/advocate";

/// Task identifier for the adversarial challenge call
pub const TASK_CHALLENGE: &str = "debate/challenge";

/// Task identifier for the reconciliation call
pub const TASK_RECONCILE: &str = "debate/reconcile";

/// Task identifier for the grounding validation call
pub const TASK_VALIDATE_GROUNDING: &str = "debate/validate-grounding";

/// Task identifier for the direction validation call
pub const TASK_VALIDATE_DIRECTION: &str = "debate/validate-direction";

/// Immutable input to one debate run
///
/// Everything here is produced by upstream stages (extraction, research,
/// boundary clustering) and consumed read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct DebateInput {
    /// The user's original thesis
    pub thesis: String,

    /// Ordered claim set to adjudicate
    pub claims: Vec<AtomicClaim>,

    /// The real evidence pool
    pub evidence: Vec<EvidenceItem>,

    /// Assessment boundaries the evidence was clustered into
    pub boundaries: Vec<AssessmentBoundary>,

    /// Claims x boundaries evidence-count table
    pub coverage: CoverageMatrix,
}

impl DebateInput {
    /// Build an input with no boundary structure
    pub fn new(
        thesis: impl Into<String>,
        claims: Vec<AtomicClaim>,
        evidence: Vec<EvidenceItem>,
    ) -> Self {
        Self {
            thesis: thesis.into(),
            claims,
            evidence,
            boundaries: Vec::new(),
            coverage: CoverageMatrix::new(),
        }
    }

    /// Attach boundaries and the coverage matrix
    pub fn with_boundaries(
        mut self,
        boundaries: Vec<AssessmentBoundary>,
        coverage: CoverageMatrix,
    ) -> Self {
        self.boundaries = boundaries;
        self.coverage = coverage;
        self
    }

    /// Ids of every evidence item in the pool
    pub fn evidence_ids(&self) -> HashSet<EvidenceId> {
        self.evidence.iter().map(|item| item.id.clone()).collect()
    }

    /// Ids of every boundary in the cluster set
    pub fn boundary_ids(&self) -> HashSet<BoundaryId> {
        self.boundaries.iter().map(|b| b.id.clone()).collect()
    }

    /// Look up a claim by id
    pub fn claim(&self, id: &ClaimId) -> Option<&AtomicClaim> {
        self.claims.iter().find(|claim| &claim.id == id)
    }
}

/// Terminal state of one debate run
///
/// An ordered list of finalized verdicts (one per input claim, in input
/// order) plus the append-only warning stream, handed off to the
/// external report-assembly stage.
#[derive(Debug, Clone, PartialEq)]
pub struct DebateOutcome {
    /// Finalized verdicts, in input claim order
    pub verdicts: Vec<ClaimVerdict>,

    /// Everything the pipeline wanted to say about how it got there
    pub warnings: Vec<AnalysisWarning>,
}

/// One claim's revision as parsed from the reconciler's output
#[derive(Debug, Clone, PartialEq)]
pub struct ReconciledVerdict {
    /// Claim being revised
    pub claim_id: ClaimId,

    /// Revised truth percentage
    pub truth_pct: f64,

    /// Revised confidence
    pub confidence: f64,

    /// Revised rationale, if the reconciler provided one
    pub rationale: Option<String>,

    /// Replies to challenges the reconciler acted on
    pub responses: Vec<ChallengeResponse>,
}
