//! Defensive parsing of model output
//!
//! Model output is untrusted. Missing or non-numeric verdict fields
//! default to neutral 50 and are clamped, never thrown; each default is
//! recorded in the warning stream so nothing is swallowed silently.
//! Challenge and reconciliation entries that cannot be keyed to a claim
//! are skipped with a warning rather than invented.

use crate::types::{DebateInput, ReconciledVerdict};
use arbiter_domain::scale::{clamp_truth_percentage, BandConfig};
use arbiter_domain::verdict::BoundaryFinding;
use arbiter_domain::{
    AnalysisWarning, AtomicClaim, BoundaryId, ChallengeDocument, ChallengePoint,
    ChallengeResponse, ChallengeSeverity, ChallengeType, ClaimId, ClaimVerdict,
    EvidenceDirection, EvidenceId, WarningKind, WarningSeverity,
};
use serde_json::Value;
use std::collections::HashMap;
use tracing::warn;

/// Advocate output parsed into verdicts plus any defaulting warnings
#[derive(Debug, Clone)]
pub struct ParsedAdvocate {
    /// One verdict per input claim, in input order
    pub verdicts: Vec<ClaimVerdict>,

    /// Warnings recorded while parsing
    pub warnings: Vec<AnalysisWarning>,
}

fn numeric_field<'a>(entry: &Value, key: &'a str, defaulted: &mut Vec<&'a str>) -> f64 {
    match entry.get(key).and_then(Value::as_f64) {
        Some(number) => number,
        None => {
            defaulted.push(key);
            50.0
        }
    }
}

fn id_list(value: Option<&Value>) -> Vec<EvidenceId> {
    value
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(Value::as_str)
                .map(EvidenceId::from)
                .collect()
        })
        .unwrap_or_default()
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(Value::as_str)
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

fn boundary_findings(value: Option<&Value>) -> Vec<BoundaryFinding> {
    value
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| {
                    let boundary_id = entry.get("boundary_id").and_then(Value::as_str)?;
                    Some(BoundaryFinding {
                        boundary_id: BoundaryId::from(boundary_id),
                        truth_pct: clamp_truth_percentage(
                            entry.get("truth_pct").and_then(Value::as_f64).unwrap_or(50.0),
                        ),
                        confidence: clamp_truth_percentage(
                            entry
                                .get("confidence")
                                .and_then(Value::as_f64)
                                .unwrap_or(50.0),
                        ),
                        direction: entry
                            .get("direction")
                            .and_then(Value::as_str)
                            .and_then(EvidenceDirection::parse)
                            .unwrap_or(EvidenceDirection::Neutral),
                    })
                })
                .collect()
        })
        .unwrap_or_default()
}

fn verdict_from_entry(
    claim: &AtomicClaim,
    entry: &Value,
    bands: &BandConfig,
    warnings: &mut Vec<AnalysisWarning>,
) -> ClaimVerdict {
    let mut defaulted = Vec::new();
    let truth_pct = numeric_field(entry, "truth_pct", &mut defaulted);
    let confidence = numeric_field(entry, "confidence", &mut defaulted);
    let rationale = entry
        .get("rationale")
        .and_then(Value::as_str)
        .unwrap_or_default();

    let mut verdict = ClaimVerdict::new(
        claim.id.clone(),
        truth_pct,
        confidence,
        rationale,
        claim.harm,
        bands,
    );
    verdict.supporting_evidence = id_list(entry.get("supporting_evidence"));
    verdict.contradicting_evidence = id_list(entry.get("contradicting_evidence"));
    verdict.boundary_findings = boundary_findings(entry.get("boundary_findings"));

    if !defaulted.is_empty() {
        warn!(claim = %claim.id, fields = ?defaulted, "non-numeric verdict fields defaulted");
        warnings.push(AnalysisWarning::for_claim(
            WarningKind::MalformedModelOutput,
            WarningSeverity::Info,
            claim.id.clone(),
            format!("non-numeric fields defaulted to 50: {}", defaulted.join(", ")),
        ));
    }

    verdict
}

/// Parse advocate output into one verdict per input claim
///
/// Claims the model skipped get a neutral 50/50 verdict; entries keyed
/// to unknown claim ids are ignored.
pub fn parse_advocate(output: &Value, input: &DebateInput, bands: &BandConfig) -> ParsedAdvocate {
    let mut warnings = Vec::new();

    let mut by_id: HashMap<&str, &Value> = HashMap::new();
    if let Some(entries) = output.get("verdicts").and_then(Value::as_array) {
        for entry in entries {
            if let Some(id) = entry.get("claim_id").and_then(Value::as_str) {
                by_id.insert(id, entry);
            }
        }
    }

    let verdicts = input
        .claims
        .iter()
        .map(|claim| match by_id.get(claim.id.as_str()) {
            Some(entry) => verdict_from_entry(claim, entry, bands, &mut warnings),
            None => {
                warn!(claim = %claim.id, "advocate produced no verdict; defaulting to neutral");
                warnings.push(AnalysisWarning::for_claim(
                    WarningKind::MalformedModelOutput,
                    WarningSeverity::Info,
                    claim.id.clone(),
                    "advocate produced no verdict; defaulted to 50/50",
                ));
                ClaimVerdict::new(claim.id.clone(), 50.0, 50.0, "", claim.harm, bands)
            }
        })
        .collect();

    ParsedAdvocate { verdicts, warnings }
}

/// Extract clamped truth percentages keyed by claim id
///
/// Used on self-consistency re-runs, where only the percentage matters.
pub fn truth_by_claim(output: &Value) -> HashMap<ClaimId, f64> {
    let mut truths = HashMap::new();
    if let Some(entries) = output.get("verdicts").and_then(Value::as_array) {
        for entry in entries {
            let (Some(id), Some(truth)) = (
                entry.get("claim_id").and_then(Value::as_str),
                entry.get("truth_pct").and_then(Value::as_f64),
            ) else {
                continue;
            };
            truths.insert(ClaimId::from(id), clamp_truth_percentage(truth));
        }
    }
    truths
}

/// Parse challenger output into a challenge document
pub fn parse_challenges(output: &Value) -> (ChallengeDocument, Vec<AnalysisWarning>) {
    let mut points = Vec::new();
    let mut warnings = Vec::new();

    if let Some(entries) = output.get("points").and_then(Value::as_array) {
        for (index, entry) in entries.iter().enumerate() {
            let Some(claim_id) = entry.get("claim_id").and_then(Value::as_str) else {
                warn!(index, "challenge point missing claim_id; skipped");
                warnings.push(AnalysisWarning::general(
                    WarningKind::MalformedModelOutput,
                    WarningSeverity::Info,
                    format!("challenge point {} missing claim_id; skipped", index),
                ));
                continue;
            };
            let Some(description) = entry.get("description").and_then(Value::as_str) else {
                warn!(index, claim_id, "challenge point missing description; skipped");
                warnings.push(AnalysisWarning::general(
                    WarningKind::MalformedModelOutput,
                    WarningSeverity::Info,
                    format!("challenge point {} missing description; skipped", index),
                ));
                continue;
            };

            points.push(ChallengePoint {
                id: entry
                    .get("id")
                    .and_then(Value::as_str)
                    .map(String::from)
                    .unwrap_or_else(|| format!("cp{}", index + 1)),
                claim_id: ClaimId::from(claim_id),
                challenge_type: entry
                    .get("type")
                    .and_then(Value::as_str)
                    .and_then(ChallengeType::parse)
                    .unwrap_or(ChallengeType::Assumption),
                severity: entry
                    .get("severity")
                    .and_then(Value::as_str)
                    .and_then(ChallengeSeverity::parse)
                    .unwrap_or(ChallengeSeverity::Medium),
                description: description.to_string(),
                cited_evidence: id_list(entry.get("cited_evidence")),
                citation_check: None,
            });
        }
    }

    (ChallengeDocument { points }, warnings)
}

fn responses(value: Option<&Value>) -> Vec<ChallengeResponse> {
    value
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .map(|entry| ChallengeResponse {
                    challenge_point_ids: string_list(entry.get("challenge_point_ids")),
                    verdict_changed: entry
                        .get("verdict_changed")
                        .and_then(Value::as_bool)
                        .unwrap_or(false),
                    reply: entry
                        .get("reply")
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_string(),
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Parse reconciler output into per-claim revisions
///
/// A claim absent from the output is simply not revised; a present
/// entry with non-numeric scores defaults them to neutral.
pub fn parse_reconciliation(output: &Value) -> (Vec<ReconciledVerdict>, Vec<AnalysisWarning>) {
    let mut revised = Vec::new();
    let mut warnings = Vec::new();

    if let Some(entries) = output.get("verdicts").and_then(Value::as_array) {
        for (index, entry) in entries.iter().enumerate() {
            let Some(claim_id) = entry.get("claim_id").and_then(Value::as_str) else {
                warn!(index, "reconciled verdict missing claim_id; skipped");
                warnings.push(AnalysisWarning::general(
                    WarningKind::MalformedModelOutput,
                    WarningSeverity::Info,
                    format!("reconciled verdict {} missing claim_id; skipped", index),
                ));
                continue;
            };
            let claim_id = ClaimId::from(claim_id);

            let mut defaulted = Vec::new();
            let truth_pct = numeric_field(entry, "truth_pct", &mut defaulted);
            let confidence = numeric_field(entry, "confidence", &mut defaulted);
            if !defaulted.is_empty() {
                warnings.push(AnalysisWarning::for_claim(
                    WarningKind::MalformedModelOutput,
                    WarningSeverity::Info,
                    claim_id.clone(),
                    format!(
                        "non-numeric reconciled fields defaulted to 50: {}",
                        defaulted.join(", ")
                    ),
                ));
            }

            revised.push(ReconciledVerdict {
                claim_id,
                truth_pct,
                confidence,
                rationale: entry
                    .get("rationale")
                    .and_then(Value::as_str)
                    .map(String::from),
                responses: responses(entry.get("responses")),
            });
        }
    }

    (revised, warnings)
}

/// Parse a validation call's output into (claim id, message) issues
pub fn parse_validation_issues(output: &Value) -> Vec<(Option<ClaimId>, String)> {
    output
        .get("issues")
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| match entry {
                    Value::String(message) => Some((None, message.clone())),
                    Value::Object(_) => {
                        let message = entry.get("message").and_then(Value::as_str)?;
                        let claim_id = entry
                            .get("claim_id")
                            .and_then(Value::as_str)
                            .map(ClaimId::from);
                        Some((claim_id, message.to_string()))
                    }
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbiter_domain::{Centrality, HarmPotential, VerdictLabel};
    use serde_json::json;

    fn input() -> DebateInput {
        DebateInput::new(
            "thesis",
            vec![
                AtomicClaim::new("c1", "first claim", Centrality::High, HarmPotential::Low),
                AtomicClaim::new("c2", "second claim", Centrality::Medium, HarmPotential::Low),
            ],
            vec![],
        )
    }

    #[test]
    fn test_parse_advocate_full_entry() {
        let output = json!({"verdicts": [
            {
                "claim_id": "c1",
                "truth_pct": 82.0,
                "confidence": 74.0,
                "rationale": "filings support the claim",
                "supporting_evidence": ["e1", "e2"],
                "contradicting_evidence": [],
                "boundary_findings": [
                    {"boundary_id": "b1", "truth_pct": 85.0, "confidence": 70.0, "direction": "supports"}
                ]
            },
            {"claim_id": "c2", "truth_pct": 31.0, "confidence": 55.0, "rationale": "thin"}
        ]});

        let parsed = parse_advocate(&output, &input(), &BandConfig::default());
        assert!(parsed.warnings.is_empty());
        assert_eq!(parsed.verdicts.len(), 2);

        let first = &parsed.verdicts[0];
        assert_eq!(first.truth_pct, 82.0);
        assert_eq!(first.label, VerdictLabel::MostlyTrue);
        assert_eq!(first.supporting_evidence.len(), 2);
        assert_eq!(first.boundary_findings.len(), 1);
        assert_eq!(
            first.boundary_findings[0].direction,
            EvidenceDirection::Supports
        );
    }

    #[test]
    fn test_parse_advocate_missing_claim_defaults_neutral() {
        let output = json!({"verdicts": [
            {"claim_id": "c1", "truth_pct": 82.0, "confidence": 74.0}
        ]});

        let parsed = parse_advocate(&output, &input(), &BandConfig::default());
        assert_eq!(parsed.verdicts[1].truth_pct, 50.0);
        assert_eq!(parsed.verdicts[1].confidence, 50.0);
        assert_eq!(parsed.warnings.len(), 1);
        assert_eq!(parsed.warnings[0].kind, WarningKind::MalformedModelOutput);
    }

    #[test]
    fn test_parse_advocate_non_numeric_fields_default() {
        let output = json!({"verdicts": [
            {"claim_id": "c1", "truth_pct": "very high", "confidence": 70.0},
            {"claim_id": "c2", "truth_pct": 40.0, "confidence": 60.0}
        ]});

        let parsed = parse_advocate(&output, &input(), &BandConfig::default());
        assert_eq!(parsed.verdicts[0].truth_pct, 50.0);
        assert_eq!(parsed.verdicts[0].confidence, 70.0);
        assert_eq!(parsed.warnings.len(), 1);
    }

    #[test]
    fn test_parse_advocate_clamps_out_of_range() {
        let output = json!({"verdicts": [
            {"claim_id": "c1", "truth_pct": 140.0, "confidence": -10.0},
            {"claim_id": "c2", "truth_pct": 40.0, "confidence": 60.0}
        ]});

        let parsed = parse_advocate(&output, &input(), &BandConfig::default());
        assert_eq!(parsed.verdicts[0].truth_pct, 100.0);
        assert_eq!(parsed.verdicts[0].confidence, 0.0);
    }

    #[test]
    fn test_truth_by_claim() {
        let output = json!({"verdicts": [
            {"claim_id": "c1", "truth_pct": 77.0},
            {"claim_id": "c2", "truth_pct": "bad"},
            {"truth_pct": 10.0}
        ]});

        let truths = truth_by_claim(&output);
        assert_eq!(truths.len(), 1);
        assert_eq!(truths.get(&ClaimId::from("c1")), Some(&77.0));
    }

    #[test]
    fn test_parse_challenges_skips_unkeyed_points() {
        let output = json!({"points": [
            {
                "id": "cp1",
                "claim_id": "c1",
                "type": "missing-evidence",
                "severity": "high",
                "description": "no primary source cited",
                "cited_evidence": ["e1"]
            },
            {"description": "orphan objection"},
            {"claim_id": "c2"}
        ]});

        let (doc, warnings) = parse_challenges(&output);
        assert_eq!(doc.points.len(), 1);
        assert_eq!(doc.points[0].challenge_type, ChallengeType::MissingEvidence);
        assert_eq!(doc.points[0].severity, ChallengeSeverity::High);
        assert_eq!(warnings.len(), 2);
    }

    #[test]
    fn test_parse_challenges_generates_missing_ids() {
        let output = json!({"points": [
            {"claim_id": "c1", "description": "assumes representativeness"}
        ]});

        let (doc, _) = parse_challenges(&output);
        assert_eq!(doc.points[0].id, "cp1");
        assert_eq!(doc.points[0].challenge_type, ChallengeType::Assumption);
    }

    #[test]
    fn test_parse_reconciliation() {
        let output = json!({"verdicts": [
            {
                "claim_id": "c1",
                "truth_pct": 64.0,
                "confidence": 58.0,
                "rationale": "challenge cp1 partially upheld",
                "responses": [
                    {"challenge_point_ids": ["cp1"], "verdict_changed": true, "reply": "accepted"}
                ]
            }
        ]});

        let (revised, warnings) = parse_reconciliation(&output);
        assert!(warnings.is_empty());
        assert_eq!(revised.len(), 1);
        assert_eq!(revised[0].truth_pct, 64.0);
        assert!(revised[0].responses[0].verdict_changed);
        assert_eq!(revised[0].responses[0].challenge_point_ids, vec!["cp1"]);
    }

    #[test]
    fn test_parse_validation_issues_mixed_shapes() {
        let output = json!({"issues": [
            {"claim_id": "c1", "message": "cited evidence does not mention the date"},
            "aggregate direction disagrees with polarity"
        ]});

        let issues = parse_validation_issues(&output);
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].0, Some(ClaimId::from("c1")));
        assert_eq!(issues[1].0, None);
    }
}
