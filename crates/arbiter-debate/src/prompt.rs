//! Payload builders for each debate role
//!
//! Payloads are plain data; rendering them into provider-specific
//! prompts is the model caller's concern. Each role gets exactly the
//! digest it needs and nothing more, to keep call sizes bounded.

use crate::types::DebateInput;
use arbiter_domain::{ChallengeDocument, ClaimVerdict};
use serde_json::{json, Value};

fn claim_digests(input: &DebateInput) -> Vec<Value> {
    input
        .claims
        .iter()
        .map(|claim| {
            json!({
                "claim_id": claim.id.as_str(),
                "text": claim.text,
                "centrality": claim.centrality.as_str(),
                "harm": claim.harm.as_str(),
                "entities": claim.entities,
            })
        })
        .collect()
}

fn evidence_digests(input: &DebateInput) -> Vec<Value> {
    input
        .evidence
        .iter()
        .map(|item| {
            json!({
                "evidence_id": item.id.as_str(),
                "statement": item.statement,
                "direction": item.direction.as_str(),
                "scope": item.scope,
            })
        })
        .collect()
}

fn boundary_digests(input: &DebateInput) -> Vec<Value> {
    input
        .boundaries
        .iter()
        .map(|boundary| {
            json!({
                "boundary_id": boundary.id.as_str(),
                "label": boundary.label,
                "scope": boundary.scope_description,
                "item_count": boundary.item_count,
            })
        })
        .collect()
}

fn verdict_digests(verdicts: &[ClaimVerdict]) -> Vec<Value> {
    verdicts
        .iter()
        .map(|verdict| {
            json!({
                "claim_id": verdict.claim_id.as_str(),
                "truth_pct": verdict.truth_pct,
                "confidence": verdict.confidence,
                "label": verdict.label.as_str(),
                "rationale": verdict.rationale,
                "supporting_evidence": verdict
                    .supporting_evidence
                    .iter()
                    .map(|id| id.as_str())
                    .collect::<Vec<_>>(),
                "contradicting_evidence": verdict
                    .contradicting_evidence
                    .iter()
                    .map(|id| id.as_str())
                    .collect::<Vec<_>>(),
            })
        })
        .collect()
}

fn coverage_links(input: &DebateInput) -> Vec<Value> {
    input
        .claims
        .iter()
        .flat_map(|claim| {
            input
                .coverage
                .boundaries_for_claim(&claim.id)
                .into_iter()
                .map(|boundary| {
                    json!({
                        "claim_id": claim.id.as_str(),
                        "boundary_id": boundary.as_str(),
                        "evidence_links": input.coverage.link_count(&claim.id, boundary),
                    })
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Payload for the advocate call and its consistency re-runs
pub fn advocate_payload(input: &DebateInput) -> Value {
    json!({
        "thesis": input.thesis,
        "claims": claim_digests(input),
        "evidence": evidence_digests(input),
        "boundaries": boundary_digests(input),
        "coverage": coverage_links(input),
    })
}

/// Payload for the adversarial challenge call
pub fn challenge_payload(input: &DebateInput, verdicts: &[ClaimVerdict]) -> Value {
    json!({
        "thesis": input.thesis,
        "claims": claim_digests(input),
        "evidence": evidence_digests(input),
        "verdicts": verdict_digests(verdicts),
    })
}

/// Payload for the reconciliation call
pub fn reconcile_payload(
    input: &DebateInput,
    verdicts: &[ClaimVerdict],
    challenges: &ChallengeDocument,
) -> Value {
    let challenge_digests: Vec<Value> = challenges
        .points
        .iter()
        .map(|point| {
            json!({
                "id": point.id,
                "claim_id": point.claim_id.as_str(),
                "type": point.challenge_type.as_str(),
                "severity": point.severity.as_str(),
                "description": point.description,
                "cited_evidence": point
                    .cited_evidence
                    .iter()
                    .map(|id| id.as_str())
                    .collect::<Vec<_>>(),
                "has_valid_citation": point
                    .citation_check
                    .as_ref()
                    .map(|check| check.has_valid_citation()),
            })
        })
        .collect();

    let consistency: Vec<Value> = verdicts
        .iter()
        .map(|verdict| {
            json!({
                "claim_id": verdict.claim_id.as_str(),
                "assessed": verdict.consistency.assessed,
                "observed_pcts": verdict.consistency.observed_pcts,
                "stable": verdict.consistency.stable,
            })
        })
        .collect();

    json!({
        "thesis": input.thesis,
        "verdicts": verdict_digests(verdicts),
        "challenges": challenge_digests,
        "consistency": consistency,
        "evidence": evidence_digests(input),
    })
}

/// Payload for the grounding validation call
pub fn grounding_payload(input: &DebateInput, verdicts: &[ClaimVerdict]) -> Value {
    json!({
        "verdicts": verdict_digests(verdicts),
        "evidence": evidence_digests(input),
    })
}

/// Payload for the direction validation call
pub fn direction_payload(input: &DebateInput, verdicts: &[ClaimVerdict]) -> Value {
    json!({
        "thesis": input.thesis,
        "verdicts": verdict_digests(verdicts),
        "evidence": evidence_digests(input),
    })
}
