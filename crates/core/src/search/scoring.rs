//! Relevance scoring for free-text typeahead queries

use crate::domain::perfume::Perfume;
use crate::text::fold_case;

/// Points awarded per match kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchWeights {
    /// Field equals the query (default: 100)
    pub exact: u32,
    /// Field starts with the query (default: 50)
    pub prefix: u32,
    /// Field contains the query (default: 25)
    pub contains: u32,
    /// Per note containing the query (default: 10)
    pub note: u32,
    /// Description contains the query (default: 5)
    pub description: u32,
}

impl Default for MatchWeights {
    fn default() -> Self {
        super::DEFAULT_MATCH_WEIGHTS
    }
}

/// Scores one record against a query. Brand and name are graded
/// independently, so a record can collect both bonuses.
#[derive(Debug, Clone)]
pub struct RelevanceScorer {
    weights: MatchWeights,
}

impl RelevanceScorer {
    pub fn new() -> Self {
        Self { weights: MatchWeights::default() }
    }

    pub fn with_weights(weights: MatchWeights) -> Self {
        Self { weights }
    }

    /// Total score for `perfume`. `needle` must already be case-folded.
    pub fn score(&self, perfume: &Perfume, needle: &str) -> u32 {
        if needle.is_empty() {
            return 0;
        }

        let mut score = self.field_score(&perfume.brand, needle);
        score += self.field_score(&perfume.name, needle);

        let note_hits = perfume.notes().filter(|note| fold_case(note).contains(needle)).count();
        score += self.weights.note * note_hits as u32;

        if fold_case(&perfume.description).contains(needle) {
            score += self.weights.description;
        }

        score
    }

    fn field_score(&self, field: &str, needle: &str) -> u32 {
        let field = fold_case(field);
        if field == needle {
            self.weights.exact
        } else if field.starts_with(needle) {
            self.weights.prefix
        } else if field.contains(needle) {
            self.weights.contains
        } else {
            0
        }
    }
}

impl Default for RelevanceScorer {
    fn default() -> Self {
        Self::new()
    }
}
