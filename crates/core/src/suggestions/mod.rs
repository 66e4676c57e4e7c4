//! Related Perfume Suggestions
//!
//! Scores every other record against a reference perfume by shared notes,
//! brand and gender compatibility.

mod scoring;

pub use scoring::{Reference, SimilarityScorer, SimilarityWeights};

use crate::domain::perfume::{Perfume, PerfumeId};

/// Default similarity weights
pub const DEFAULT_SIMILARITY_WEIGHTS: SimilarityWeights =
    SimilarityWeights { shared_note: 2, same_brand: 3, compatible_gender: 1 };

/// Maximum suggestions to return
pub const DEFAULT_SUGGESTION_LIMIT: usize = 6;

/// Perfumes most similar to `reference_id`, best first. Ties keep catalog
/// order; an unknown id yields no suggestions.
pub fn suggest<'a>(
    records: &'a [Perfume],
    reference_id: &PerfumeId,
    limit: usize,
) -> Vec<&'a Perfume> {
    suggest_with(&SimilarityScorer::default(), records, reference_id, limit)
}

pub fn suggest_with<'a>(
    scorer: &SimilarityScorer,
    records: &'a [Perfume],
    reference_id: &PerfumeId,
    limit: usize,
) -> Vec<&'a Perfume> {
    let Some(reference) = records.iter().find(|perfume| &perfume.id == reference_id) else {
        tracing::debug!(id = %reference_id, "suggestion reference not found");
        return Vec::new();
    };
    let reference = Reference::new(reference);

    let mut scored: Vec<(&Perfume, u32)> = records
        .iter()
        .filter(|perfume| &perfume.id != reference_id)
        .map(|perfume| (perfume, scorer.score(perfume, &reference)))
        .filter(|(_, score)| *score > 0)
        .collect();

    // stable: equal scores stay in catalog order
    scored.sort_by(|a, b| b.1.cmp(&a.1));

    tracing::debug!(id = %reference_id, candidates = scored.len(), limit, "related suggestions");

    scored.into_iter().take(limit).map(|(perfume, _)| perfume).collect()
}
