//! Swappable pattern sets driving the correction heuristics
//!
//! The production lexicon lives in `PatternSet::default()`; callers that
//! need a domain-specific lexicon substitute their own value instead of
//! editing call sites.

use regex::Regex;
use std::collections::HashSet;

/// Polarity of an evaluative term usage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    /// The term is affirmed ("the trial was fair")
    Positive,

    /// The term is negated or lexically negative ("unfair", "not fair")
    Negative,
}

impl Polarity {
    /// The opposite polarity
    pub fn flipped(&self) -> Self {
        match self {
            Polarity::Positive => Polarity::Negative,
            Polarity::Negative => Polarity::Positive,
        }
    }
}

/// A family of evaluative terms sharing one core judgment
///
/// Example: core "fair" with positive forms `["fair"]` and negative
/// forms `["unfair", "unjust"]`.
#[derive(Debug, Clone)]
pub struct EvaluativeFamily {
    /// Canonical name of the family
    pub core: String,

    /// Word forms affirming the judgment
    pub positive_forms: Vec<String>,

    /// Word forms denying the judgment (lexically negative)
    pub negative_forms: Vec<String>,
}

impl EvaluativeFamily {
    /// Build a family from string slices
    pub fn new(core: &str, positive: &[&str], negative: &[&str]) -> Self {
        Self {
            core: core.to_string(),
            positive_forms: positive.iter().map(|s| s.to_string()).collect(),
            negative_forms: negative.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// A comparative sentence normalized to winner/loser form
///
/// "A is more efficient than B", "B is less efficient than A" and
/// "favors A over B" all normalize to winner A, loser B (the first two
/// on dimension "efficient", the last on "favored"), so inversion and
/// subject-swap checks reduce to comparing winner/loser pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparativeFrame {
    /// Subject the sentence ranks higher
    pub winner: String,

    /// Subject the sentence ranks lower
    pub loser: String,

    /// Canonical evaluative dimension
    pub adjective: String,
}

/// Compiled pattern sets and lexicon for the correction heuristics
#[derive(Debug, Clone)]
pub struct PatternSet {
    /// Patterns marking a positive assertion
    pub positive_assertions: Vec<Regex>,

    /// Patterns marking negation
    pub negations: Vec<Regex>,

    /// "X is more/less ADJ than Y" frame
    pub comparative: Regex,

    /// "X is better/higher/... than Y" frame (inflected comparatives)
    pub inflected_comparative: Regex,

    /// "favors X over Y" frame
    pub favor: Regex,

    /// Inflected comparative word -> (canonical adjective, ranks-higher)
    pub comparative_words: Vec<(String, String, bool)>,

    /// Evaluative term families for polarity matching
    pub families: Vec<EvaluativeFamily>,

    /// Stop words removed before subject token matching
    pub stop_words: HashSet<String>,

    /// Minimum token overlap for two subjects to be considered the same
    pub subject_overlap_threshold: f64,
}

impl Default for PatternSet {
    fn default() -> Self {
        let positive_assertions = vec![
            Regex::new(r"(?i)\b(?:is|are|was|were|has|have|had|does|did|do)\b").unwrap(),
            Regex::new(r"(?i)\b(?:confirmed|supported|demonstrated|demonstrates|shows|showed|proved|proves|occurred|succeeded)\b")
                .unwrap(),
        ];

        let negations = vec![
            Regex::new(r"(?i)\b(?:not|never|no|none|cannot)\b").unwrap(),
            Regex::new(r"(?i)\b(?:isn't|wasn't|weren't|aren't|doesn't|didn't|don't|can't|won't|hasn't|haven't)\b")
                .unwrap(),
            Regex::new(r"(?i)\b(?:fails?|failed)\s+to\b").unwrap(),
            Regex::new(r"(?i)\b(?:lacks?|lacked|without|absent|refuted|disproved|contradicted)\b")
                .unwrap(),
        ];

        let comparative = Regex::new(
            r"(?i)([^.,;!?]+?)\s+(?:is|are|was|were)\s+(more|less)\s+([a-z][a-z-]*)\s+than\s+([^.,;!?]+)",
        )
        .unwrap();

        let inflected_comparative = Regex::new(
            r"(?i)([^.,;!?]+?)\s+(?:is|are|was|were)\s+(higher|lower|greater|smaller|better|worse|faster|slower|stronger|weaker|safer|riskier|cheaper|costlier)\s+than\s+([^.,;!?]+)",
        )
        .unwrap();

        let favor =
            Regex::new(r"(?i)favou?rs?\s+([^.,;!?]+?)\s+over\s+([^.,;!?]+)").unwrap();

        let comparative_words = [
            ("higher", "high", true),
            ("lower", "high", false),
            ("greater", "great", true),
            ("smaller", "great", false),
            ("better", "good", true),
            ("worse", "good", false),
            ("faster", "fast", true),
            ("slower", "fast", false),
            ("stronger", "strong", true),
            ("weaker", "strong", false),
            ("safer", "safe", true),
            ("riskier", "safe", false),
            ("cheaper", "cheap", true),
            ("costlier", "cheap", false),
        ]
        .iter()
        .map(|(word, adj, wins)| (word.to_string(), adj.to_string(), *wins))
        .collect();

        let families = vec![
            EvaluativeFamily::new("fair", &["fair"], &["unfair", "unjust"]),
            EvaluativeFamily::new("valid", &["valid"], &["invalid"]),
            EvaluativeFamily::new("lawful", &["lawful", "legal"], &["unlawful", "illegal"]),
            EvaluativeFamily::new("accurate", &["accurate"], &["inaccurate"]),
            EvaluativeFamily::new(
                "proportionate",
                &["proportionate"],
                &["disproportionate"],
            ),
            EvaluativeFamily::new("safe", &["safe"], &["unsafe", "dangerous"]),
            EvaluativeFamily::new("effective", &["effective"], &["ineffective"]),
            EvaluativeFamily::new("reliable", &["reliable"], &["unreliable"]),
            EvaluativeFamily::new("ethical", &["ethical"], &["unethical"]),
            EvaluativeFamily::new("true", &["true", "truthful"], &["false", "untrue"]),
        ];

        let stop_words = [
            "the", "a", "an", "of", "in", "on", "at", "to", "for", "is", "are", "was", "were",
            "than", "more", "less", "and", "or", "that", "this", "it", "its", "with", "by",
            "from", "as", "be", "been",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        Self {
            positive_assertions,
            negations,
            comparative,
            inflected_comparative,
            favor,
            comparative_words,
            families,
            stop_words,
            subject_overlap_threshold: 0.75,
        }
    }
}

impl PatternSet {
    /// Whether any negation pattern matches the text
    pub fn is_negated(&self, text: &str) -> bool {
        self.negations.iter().any(|p| p.is_match(text))
    }

    /// Whether the text positively asserts something (and nothing negates it)
    pub fn asserts_positive(&self, text: &str) -> bool {
        !self.is_negated(text) && self.positive_assertions.iter().any(|p| p.is_match(text))
    }

    /// Tokenize, lowercase, and drop stop words
    pub fn content_tokens(&self, text: &str) -> HashSet<String> {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .map(|t| t.to_lowercase())
            .filter(|t| !self.stop_words.contains(t))
            .collect()
    }

    /// Token-overlap subject matching, tolerant of short-vs-expanded phrasing
    ///
    /// Overlap is measured against the smaller token set so "the policy"
    /// still matches "the new policy".
    pub fn subjects_match(&self, a: &str, b: &str) -> bool {
        let ta = self.content_tokens(a);
        let tb = self.content_tokens(b);
        if ta.is_empty() || tb.is_empty() {
            return a.trim().eq_ignore_ascii_case(b.trim());
        }
        let shared = ta.intersection(&tb).count() as f64;
        let smaller = ta.len().min(tb.len()) as f64;
        shared / smaller >= self.subject_overlap_threshold
    }

    /// Extract every comparative frame from the text, normalized to
    /// winner/loser form
    pub fn comparative_frames(&self, text: &str) -> Vec<ComparativeFrame> {
        let mut frames = Vec::new();

        for caps in self.comparative.captures_iter(text) {
            let left = clean_subject(&caps[1]);
            let comparator = caps[2].to_lowercase();
            let adjective = caps[3].to_lowercase();
            let right = clean_subject(&caps[4]);

            let (winner, loser) = if comparator == "more" {
                (left, right)
            } else {
                (right, left)
            };
            frames.push(ComparativeFrame {
                winner,
                loser,
                adjective,
            });
        }

        for caps in self.inflected_comparative.captures_iter(text) {
            let left = clean_subject(&caps[1]);
            let word = caps[2].to_lowercase();
            let right = clean_subject(&caps[3]);

            if let Some((_, adjective, left_wins)) =
                self.comparative_words.iter().find(|(w, _, _)| *w == word)
            {
                let (winner, loser) = if *left_wins {
                    (left, right)
                } else {
                    (right, left)
                };
                frames.push(ComparativeFrame {
                    winner,
                    loser,
                    adjective: adjective.clone(),
                });
            }
        }

        for caps in self.favor.captures_iter(text) {
            frames.push(ComparativeFrame {
                winner: clean_subject(&caps[1]),
                loser: clean_subject(&caps[2]),
                adjective: "favored".to_string(),
            });
        }

        frames
    }

    /// Polarity with which the text uses an evaluative family, if at all
    ///
    /// A positive form preceded by a nearby negator reads as negative,
    /// and vice versa ("not unfair" reads as positive).
    pub fn family_polarity(&self, text: &str, family: &EvaluativeFamily) -> Option<Polarity> {
        let lower = text.to_lowercase();
        let words: Vec<&str> = lower
            .split(|c: char| !c.is_alphanumeric() && c != '\'')
            .filter(|t| !t.is_empty())
            .collect();

        for (idx, word) in words.iter().enumerate() {
            let base = if family.positive_forms.iter().any(|f| f == word) {
                Some(Polarity::Positive)
            } else if family.negative_forms.iter().any(|f| f == word) {
                Some(Polarity::Negative)
            } else {
                None
            };

            if let Some(polarity) = base {
                let window_start = idx.saturating_sub(3);
                let negated = words[window_start..idx].iter().any(|w| {
                    matches!(*w, "not" | "never" | "no" | "hardly")
                        || w.ends_with("n't")
                });
                return Some(if negated { polarity.flipped() } else { polarity });
            }
        }
        None
    }
}

/// Strip leading articles and surrounding whitespace from a captured subject
fn clean_subject(raw: &str) -> String {
    let trimmed = raw.trim();
    for article in ["the ", "a ", "an "] {
        if trimmed.len() > article.len()
            && trimmed.is_char_boundary(article.len())
            && trimmed[..article.len()].eq_ignore_ascii_case(article)
        {
            return trimmed[article.len()..].trim().to_string();
        }
    }
    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negation_matching() {
        let patterns = PatternSet::default();
        assert!(patterns.is_negated("the force was NOT proportionate"));
        assert!(patterns.is_negated("the study failed to replicate"));
        assert!(patterns.is_negated("there is no evidence of this"));
        assert!(!patterns.is_negated("the force was proportionate"));
    }

    #[test]
    fn test_positive_assertion() {
        let patterns = PatternSet::default();
        assert!(patterns.asserts_positive("the response was proportionate"));
        assert!(patterns.asserts_positive("the data confirmed the trend"));
        assert!(!patterns.asserts_positive("the response was not proportionate"));
    }

    #[test]
    fn test_comparative_more_than() {
        let patterns = PatternSet::default();
        let frames = patterns.comparative_frames("Solar power is more efficient than coal");
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].winner, "Solar power");
        assert_eq!(frames[0].loser, "coal");
        assert_eq!(frames[0].adjective, "efficient");
    }

    #[test]
    fn test_comparative_less_than_swaps_winner() {
        let patterns = PatternSet::default();
        let frames = patterns.comparative_frames("Coal is less efficient than solar power");
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].winner, "solar power");
        assert_eq!(frames[0].loser, "Coal");
    }

    #[test]
    fn test_inflected_comparative() {
        let patterns = PatternSet::default();
        let frames = patterns.comparative_frames("The new method is better than the old one");
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].adjective, "good");
        assert_eq!(frames[0].winner, "new method");
    }

    #[test]
    fn test_favor_frame() {
        let patterns = PatternSet::default();
        let frames =
            patterns.comparative_frames("Standard methodology favors solar power over coal");
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].winner, "solar power");
        assert_eq!(frames[0].loser, "coal");
        assert_eq!(frames[0].adjective, "favored");
    }

    #[test]
    fn test_subject_overlap_tolerates_expansion() {
        let patterns = PatternSet::default();
        assert!(patterns.subjects_match("the policy", "the new policy"));
        assert!(patterns.subjects_match("solar power", "Solar Power"));
        assert!(!patterns.subjects_match("solar power", "coal plants"));
    }

    #[test]
    fn test_family_polarity() {
        let patterns = PatternSet::default();
        let fair = patterns
            .families
            .iter()
            .find(|f| f.core == "fair")
            .unwrap();

        assert_eq!(
            patterns.family_polarity("The trial was fair", fair),
            Some(Polarity::Positive)
        );
        assert_eq!(
            patterns.family_polarity("The trial was unfair", fair),
            Some(Polarity::Negative)
        );
        assert_eq!(
            patterns.family_polarity("The trial was not fair", fair),
            Some(Polarity::Negative)
        );
        assert_eq!(patterns.family_polarity("The trial concluded", fair), None);
    }

    #[test]
    fn test_unfair_does_not_read_as_fair() {
        let patterns = PatternSet::default();
        let fair = patterns
            .families
            .iter()
            .find(|f| f.core == "fair")
            .unwrap();
        // "unfairly" matches neither form list; whole-word matching only
        assert_eq!(
            patterns.family_polarity("treated unfairly by the press", fair),
            None
        );
    }
}
