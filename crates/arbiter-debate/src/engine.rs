//! The debate engine: a state machine over an ordered claim set
//!
//! Stages run in a fixed order with exactly two fan-out points: the
//! self-consistency and challenge calls after the advocate step, and
//! the two validation calls after enforcement. Every other stage is
//! sequential. Each stage consumes immutable inputs and produces new
//! values; nothing is patched in place by two writers.

use crate::config::DebateConfig;
use crate::enforcement::{apply_citation_checks, enforce_provenance};
use crate::error::DebateError;
use crate::finalize::{apply_harm_floor, apply_range_reporting, attach_confidence_tier};
use crate::parser;
use crate::prompt;
use crate::structural::structural_check;
use crate::types::{
    DebateInput, DebateOutcome, TASK_ADVOCATE, TASK_CHALLENGE, TASK_RECONCILE,
    TASK_VALIDATE_DIRECTION, TASK_VALIDATE_GROUNDING,
};
use arbiter_corrections::{assess_counter_claim, detect_inversion, PatternSet};
use arbiter_domain::traits::{CallOptions, ModelCall, ReliabilitySource};
use arbiter_domain::verdict::{ConsistencyResult, TriangulationScore};
use arbiter_domain::{
    AnalysisWarning, AtomicClaim, ClaimId, ClaimVerdict, EvidenceDirection, EvidenceItem,
    WarningKind, WarningSeverity,
};
use arbiter_weighting::apply_weighting;
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, info};

/// Truth-percentage spread across boundaries above which a claim is contested
const CONTESTED_SPREAD: f64 = 30.0;

/// Orchestrates one debate run over an injected model caller
///
/// Generic over the model-call capability so production wires a real
/// provider and tests wire a deterministic stub; this is the engine's
/// only polymorphism point.
pub struct DebateEngine<M: ModelCall> {
    caller: M,
    config: DebateConfig,
    patterns: PatternSet,
}

impl<M: ModelCall> DebateEngine<M> {
    /// Create an engine after validating the configuration
    pub fn new(caller: M, config: DebateConfig) -> Result<Self, DebateError> {
        config.validate().map_err(DebateError::Config)?;
        Ok(Self {
            caller,
            config,
            patterns: PatternSet::default(),
        })
    }

    /// Replace the correction pattern set
    pub fn with_patterns(mut self, patterns: PatternSet) -> Self {
        self.patterns = patterns;
        self
    }

    /// The configuration this engine runs with
    pub fn config(&self) -> &DebateConfig {
        &self.config
    }

    /// Run the full debate over one claim set
    ///
    /// Returns one finalized verdict per input claim, in input order,
    /// plus the append-only warning stream. The only error paths are a
    /// failed model call and nothing else; every recoverable condition
    /// becomes a warning.
    pub async fn run(
        &self,
        input: &DebateInput,
        reliability: &dyn ReliabilitySource,
    ) -> Result<DebateOutcome, DebateError> {
        let bands = self.config.bands;
        let evidence_ids = input.evidence_ids();
        let boundary_ids = input.boundary_ids();
        let mut warnings = Vec::new();

        // Stage 1: advocate
        info!(claims = input.claims.len(), "debate: advocate");
        let advocate_payload = prompt::advocate_payload(input);
        let output = self
            .invoke(
                TASK_ADVOCATE,
                advocate_payload.clone(),
                CallOptions::tiered(self.config.advocate_tier),
            )
            .await?;
        let parsed = parser::parse_advocate(&output, input, &bands);
        warnings.extend(parsed.warnings);
        let mut verdicts = parsed.verdicts;

        // Raw advocate percentages, captured before any refinement
        // touches the verdicts. Consistency compares advocate runs
        // against each other, not against corrected values.
        let advocate_truths: HashMap<ClaimId, f64> = verdicts
            .iter()
            .map(|verdict| (verdict.claim_id.clone(), verdict.truth_pct))
            .collect();

        // Deterministic refinement of the advocate's verdicts
        for verdict in &mut verdicts {
            let Some(claim) = input.claim(&verdict.claim_id) else {
                continue;
            };
            self.correct_inversion(verdict, claim, &mut warnings);
            let outcome = apply_weighting(
                verdict,
                &input.evidence,
                reliability,
                self.config.consensus_weighting,
                &bands,
            );
            *verdict = outcome.verdict;
            self.flag_counter_claim(verdict, claim, &input.thesis, &input.evidence, &mut warnings);
            self.triangulate(verdict, &mut warnings);
        }

        // Stage 2: self-consistency and adversarial challenge, concurrently
        info!("debate: self-consistency and challenge");
        let (consistency, challenge_output) = tokio::join!(
            self.run_self_consistency(&advocate_payload),
            self.invoke(
                TASK_CHALLENGE,
                prompt::challenge_payload(input, &verdicts),
                CallOptions::tiered(self.config.challenger_tier),
            ),
        );
        self.attach_consistency(&mut verdicts, consistency?, &advocate_truths, &mut warnings);
        let (mut challenges, challenge_warnings) = parser::parse_challenges(&challenge_output?);
        warnings.extend(challenge_warnings);

        // Stage 3: deterministic citation validation
        apply_citation_checks(&mut challenges, &evidence_ids);

        // Stage 4: reconciliation
        info!(points = challenges.points.len(), "debate: reconciliation");
        let output = self
            .invoke(
                TASK_RECONCILE,
                prompt::reconcile_payload(input, &verdicts, &challenges),
                CallOptions::tiered(self.config.reconciler_tier),
            )
            .await?;
        let (revised, reconcile_warnings) = parser::parse_reconciliation(&output);
        warnings.extend(reconcile_warnings);

        let baselines: HashMap<ClaimId, ClaimVerdict> = verdicts
            .iter()
            .map(|verdict| (verdict.claim_id.clone(), verdict.clone()))
            .collect();

        for revision in revised {
            let Some(verdict) = verdicts
                .iter_mut()
                .find(|verdict| verdict.claim_id == revision.claim_id)
            else {
                debug!(claim = %revision.claim_id, "reconciler revised an unknown claim; ignored");
                warnings.push(AnalysisWarning::general(
                    WarningKind::MalformedModelOutput,
                    WarningSeverity::Info,
                    format!("reconciler revised unknown claim '{}'", revision.claim_id),
                ));
                continue;
            };
            verdict.set_scores(revision.truth_pct, revision.confidence, &bands);
            if let Some(rationale) = revision.rationale {
                verdict.rationale = rationale;
            }
            verdict.challenge_responses = revision.responses;
        }

        // Stage 5: baseless-challenge enforcement
        for verdict in &mut verdicts {
            if let Some(baseline) = baselines.get(&verdict.claim_id) {
                warnings.extend(enforce_provenance(verdict, baseline, &challenges));
            }
        }

        // Stage 6: advisory validation, two parallel calls
        info!("debate: validation");
        let (grounding, direction) = tokio::join!(
            self.invoke(
                TASK_VALIDATE_GROUNDING,
                prompt::grounding_payload(input, &verdicts),
                CallOptions::tiered(self.config.validator_tier),
            ),
            self.invoke(
                TASK_VALIDATE_DIRECTION,
                prompt::direction_payload(input, &verdicts),
                CallOptions::tiered(self.config.validator_tier),
            ),
        );
        self.record_validation_issues(
            &grounding?,
            WarningKind::GroundingIssue,
            &mut warnings,
        );
        self.record_validation_issues(
            &direction?,
            WarningKind::DirectionIssue,
            &mut warnings,
        );

        // Stage 7: structural consistency check
        warnings.extend(structural_check(
            &verdicts,
            &evidence_ids,
            &boundary_ids,
            &bands,
        ));

        // Stages 8-10: harm floor, confidence tier, range reporting
        for verdict in &mut verdicts {
            if let Some(warning) = apply_harm_floor(verdict, &self.config) {
                warnings.push(warning);
            }
            attach_confidence_tier(verdict);
            if let Some(warning) = apply_range_reporting(verdict, &self.config) {
                warnings.push(warning);
            }
        }

        info!(
            verdicts = verdicts.len(),
            warnings = warnings.len(),
            "debate: finished"
        );
        Ok(DebateOutcome { verdicts, warnings })
    }

    async fn invoke(
        &self,
        task: &'static str,
        payload: Value,
        options: CallOptions,
    ) -> Result<Value, DebateError> {
        self.caller
            .invoke(task, payload, options)
            .await
            .map_err(|error| DebateError::Model {
                task,
                message: error.to_string(),
            })
    }

    /// Run the two consistency re-runs concurrently; `None` when disabled
    async fn run_self_consistency(
        &self,
        advocate_payload: &Value,
    ) -> Result<Option<(HashMap<ClaimId, f64>, HashMap<ClaimId, f64>)>, DebateError> {
        if !self.config.self_consistency_enabled {
            debug!("self-consistency disabled; skipping re-runs");
            return Ok(None);
        }

        let options = CallOptions::tiered(self.config.advocate_tier)
            .with_temperature(self.config.clamped_consistency_temperature());
        let (first, second) = tokio::join!(
            self.invoke(TASK_ADVOCATE, advocate_payload.clone(), options.clone()),
            self.invoke(TASK_ADVOCATE, advocate_payload.clone(), options),
        );

        Ok(Some((
            parser::truth_by_claim(&first?),
            parser::truth_by_claim(&second?),
        )))
    }

    /// Attach consistency results from the re-run observations
    ///
    /// Every observation is an advocate output: the first entry is the
    /// main run's raw percentage, not the refined verdict value.
    fn attach_consistency(
        &self,
        verdicts: &mut [ClaimVerdict],
        reruns: Option<(HashMap<ClaimId, f64>, HashMap<ClaimId, f64>)>,
        advocate_truths: &HashMap<ClaimId, f64>,
        warnings: &mut Vec<AnalysisWarning>,
    ) {
        let Some((first, second)) = reruns else {
            // Verdicts already carry the skipped result by construction
            return;
        };

        for verdict in verdicts {
            let main_run = advocate_truths
                .get(&verdict.claim_id)
                .copied()
                .unwrap_or(verdict.truth_pct);
            let mut observed = vec![main_run];
            for rerun in [&first, &second] {
                match rerun.get(&verdict.claim_id) {
                    Some(truth) => observed.push(*truth),
                    None => {
                        warnings.push(AnalysisWarning::for_claim(
                            WarningKind::MalformedModelOutput,
                            WarningSeverity::Info,
                            verdict.claim_id.clone(),
                            "consistency re-run omitted the claim; observed 50",
                        ));
                        observed.push(50.0);
                    }
                }
            }
            verdict.consistency =
                ConsistencyResult::from_observations(observed, self.config.stable_threshold);
        }
    }

    fn correct_inversion(
        &self,
        verdict: &mut ClaimVerdict,
        claim: &AtomicClaim,
        warnings: &mut Vec<AnalysisWarning>,
    ) {
        let Some(correction) = detect_inversion(
            &claim.text,
            &verdict.rationale,
            verdict.truth_pct,
            &self.patterns,
        ) else {
            return;
        };

        info!(claim = %claim.id, corrected = correction.corrected_pct, "inversion corrected");
        verdict.set_scores(correction.corrected_pct, verdict.confidence, &self.config.bands);
        warnings.push(AnalysisWarning::for_claim(
            WarningKind::InversionCorrected,
            WarningSeverity::Policy,
            claim.id.clone(),
            format!("truth flipped to {}: {}", correction.corrected_pct, correction.reason),
        ));
    }

    fn flag_counter_claim(
        &self,
        verdict: &mut ClaimVerdict,
        claim: &AtomicClaim,
        thesis: &str,
        evidence: &[EvidenceItem],
        warnings: &mut Vec<AnalysisWarning>,
    ) {
        let supporting: Vec<EvidenceItem> = evidence
            .iter()
            .filter(|item| verdict.supporting_evidence.contains(&item.id))
            .cloned()
            .collect();

        let assessment = assess_counter_claim(
            thesis,
            &claim.text,
            &supporting,
            verdict.truth_pct,
            &self.patterns,
        );
        if !assessment.is_counter_claim {
            return;
        }

        debug!(claim = %claim.id, finding = ?assessment.finding, "counter-claim flagged");
        verdict.counter_claim = true;
        warnings.push(AnalysisWarning::for_claim(
            WarningKind::CounterClaimDetected,
            WarningSeverity::Info,
            claim.id.clone(),
            "claim argues the opposite of the thesis; aggregation must invert its contribution",
        ));
    }

    /// Compute cross-boundary agreement and mark contested claims
    ///
    /// A claim is contested when its boundary findings spread wider than
    /// [`CONTESTED_SPREAD`] points or point in both directions at once;
    /// contested claims lose `contested_weight` of their confidence.
    fn triangulate(&self, verdict: &mut ClaimVerdict, warnings: &mut Vec<AnalysisWarning>) {
        if verdict.boundary_findings.len() < 2 {
            return;
        }

        let truths: Vec<f64> = verdict
            .boundary_findings
            .iter()
            .map(|finding| finding.truth_pct)
            .collect();
        let min = truths.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = truths.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let spread = max - min;

        let supports = verdict
            .boundary_findings
            .iter()
            .filter(|finding| finding.direction == EvidenceDirection::Supports)
            .count();
        let contradicts = verdict
            .boundary_findings
            .iter()
            .filter(|finding| finding.direction == EvidenceDirection::Contradicts)
            .count();
        let directional = supports + contradicts;
        let agreement = if directional == 0 {
            1.0
        } else {
            supports.max(contradicts) as f64 / directional as f64
        };

        verdict.triangulation = Some(TriangulationScore {
            boundary_count: verdict.boundary_findings.len(),
            agreement,
            spread,
        });

        let contested = spread > CONTESTED_SPREAD || (supports > 0 && contradicts > 0);
        if !contested {
            return;
        }

        verdict.contested = true;
        let reduced = verdict.confidence * (1.0 - self.config.contested_weight);
        verdict.set_scores(verdict.truth_pct, reduced, &self.config.bands);
        warnings.push(AnalysisWarning::for_claim(
            WarningKind::ContestedClaim,
            WarningSeverity::Advisory,
            verdict.claim_id.clone(),
            format!(
                "boundaries disagree (spread {:.0}, agreement {:.2}); confidence reduced",
                spread, agreement
            ),
        ));
    }

    fn record_validation_issues(
        &self,
        output: &Value,
        kind: WarningKind,
        warnings: &mut Vec<AnalysisWarning>,
    ) {
        for (claim_id, message) in parser::parse_validation_issues(output) {
            warnings.push(match claim_id {
                Some(claim_id) => {
                    AnalysisWarning::for_claim(kind, WarningSeverity::Advisory, claim_id, message)
                }
                None => AnalysisWarning::general(kind, WarningSeverity::Advisory, message),
            });
        }
    }
}
