//! Similarity scoring for related-perfume suggestions

use std::collections::HashSet;

use crate::domain::perfume::Perfume;

/// Weights for similarity components
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimilarityWeights {
    /// Per candidate note found in the reference's notes (default: 2)
    pub shared_note: u32,
    /// Same brand as the reference (default: 3)
    pub same_brand: u32,
    /// Same gender, or either side unisex (default: 1)
    pub compatible_gender: u32,
}

impl Default for SimilarityWeights {
    fn default() -> Self {
        super::DEFAULT_SIMILARITY_WEIGHTS
    }
}

/// Reference record with its note set precomputed.
#[derive(Debug, Clone)]
pub struct Reference<'a> {
    pub perfume: &'a Perfume,
    notes: HashSet<&'a str>,
}

impl<'a> Reference<'a> {
    pub fn new(perfume: &'a Perfume) -> Self {
        Self { perfume, notes: perfume.notes().collect() }
    }
}

#[derive(Debug, Clone)]
pub struct SimilarityScorer {
    weights: SimilarityWeights,
}

impl SimilarityScorer {
    pub fn new() -> Self {
        Self { weights: SimilarityWeights::default() }
    }

    pub fn with_weights(weights: SimilarityWeights) -> Self {
        Self { weights }
    }

    /// Candidate notes are walked one by one, so a note repeated across the
    /// candidate's tiers is counted each time it appears.
    pub fn score(&self, candidate: &Perfume, reference: &Reference<'_>) -> u32 {
        let shared = candidate.notes().filter(|note| reference.notes.contains(note)).count();
        let mut score = self.weights.shared_note * shared as u32;

        if candidate.brand == reference.perfume.brand {
            score += self.weights.same_brand;
        }

        if candidate.gender.is_compatible_with(&reference.perfume.gender) {
            score += self.weights.compatible_gender;
        }

        score
    }
}

impl Default for SimilarityScorer {
    fn default() -> Self {
        Self::new()
    }
}
