//! Evidence module - unverified statements gathered by the research stage

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier for an evidence item
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EvidenceId(String);

impl EvidenceId {
    /// Wrap an upstream-assigned evidence id
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw id string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EvidenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for EvidenceId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for EvidenceId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Direction of an evidence item relative to the user's thesis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvidenceDirection {
    /// Supports the thesis
    Supports,

    /// Contradicts the thesis
    Contradicts,

    /// No clear bearing either way
    Neutral,
}

impl EvidenceDirection {
    /// Get the direction name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            EvidenceDirection::Supports => "supports",
            EvidenceDirection::Contradicts => "contradicts",
            EvidenceDirection::Neutral => "neutral",
        }
    }

    /// Parse a direction from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "supports" => Some(EvidenceDirection::Supports),
            "contradicts" => Some(EvidenceDirection::Contradicts),
            "neutral" => Some(EvidenceDirection::Neutral),
            _ => None,
        }
    }

    /// The opposite direction; neutral is its own opposite
    pub fn inverted(&self) -> Self {
        match self {
            EvidenceDirection::Supports => EvidenceDirection::Contradicts,
            EvidenceDirection::Contradicts => EvidenceDirection::Supports,
            EvidenceDirection::Neutral => EvidenceDirection::Neutral,
        }
    }
}

/// An unverified statement extracted from a source
///
/// Referenced, never mutated, by verdict-stage logic. Quality signals
/// are optional because not every extractor emits them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceItem {
    /// Stable identifier
    pub id: EvidenceId,

    /// The extracted statement
    pub statement: String,

    /// Direction relative to the user's thesis
    pub direction: EvidenceDirection,

    /// Domain of the source this came from (for reliability lookup)
    pub source_domain: Option<String>,

    /// Source-methodology descriptor ("evidence scope")
    pub scope: Option<String>,

    /// How strongly this item bears on the claim, [0, 1]
    pub probative_value: Option<f64>,

    /// Extractor's confidence that the statement was read correctly, [0, 1]
    pub extraction_confidence: Option<f64>,
}

impl EvidenceItem {
    /// Create a new evidence item with no optional signals
    pub fn new(
        id: impl Into<EvidenceId>,
        statement: impl Into<String>,
        direction: EvidenceDirection,
    ) -> Self {
        Self {
            id: id.into(),
            statement: statement.into(),
            direction,
            source_domain: None,
            scope: None,
            probative_value: None,
            extraction_confidence: None,
        }
    }

    /// Attach the source domain
    pub fn with_source_domain(mut self, domain: impl Into<String>) -> Self {
        self.source_domain = Some(domain.into());
        self
    }

    /// Attach the methodology scope descriptor
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_parse() {
        assert_eq!(EvidenceDirection::parse("supports"), Some(EvidenceDirection::Supports));
        assert_eq!(EvidenceDirection::parse("Contradicts"), Some(EvidenceDirection::Contradicts));
        assert_eq!(EvidenceDirection::parse("unknown"), None);
    }

    #[test]
    fn test_direction_inverted() {
        assert_eq!(EvidenceDirection::Supports.inverted(), EvidenceDirection::Contradicts);
        assert_eq!(EvidenceDirection::Contradicts.inverted(), EvidenceDirection::Supports);
        assert_eq!(EvidenceDirection::Neutral.inverted(), EvidenceDirection::Neutral);
    }

    #[test]
    fn test_evidence_builder() {
        let item = EvidenceItem::new("e1", "GDP grew 2.1%", EvidenceDirection::Supports)
            .with_source_domain("stats.gov")
            .with_scope("official national accounts");

        assert_eq!(item.id.as_str(), "e1");
        assert_eq!(item.source_domain.as_deref(), Some("stats.gov"));
        assert_eq!(item.scope.as_deref(), Some("official national accounts"));
    }
}
