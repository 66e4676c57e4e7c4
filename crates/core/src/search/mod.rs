//! Typeahead search
//!
//! Ranks every record against a free-text query with an additive integer
//! score, independent of the catalog filters.

mod scoring;

pub use scoring::{MatchWeights, RelevanceScorer};

use crate::domain::perfume::Perfume;
use crate::text::fold_case;

/// Default point table for typeahead matches
pub const DEFAULT_MATCH_WEIGHTS: MatchWeights =
    MatchWeights { exact: 100, prefix: 50, contains: 25, note: 10, description: 5 };

/// Maximum typeahead results to return
pub const DEFAULT_SEARCH_LIMIT: usize = 8;

/// Shortest query the typeahead box sends
pub const MIN_QUERY_CHARS: usize = 2;

#[derive(Debug, Clone, Copy)]
struct ScoredPerfume<'a> {
    perfume: &'a Perfume,
    score: u32,
}

/// Records ranked by descending score, ties broken by descending popularity.
/// Zero scores are dropped; an empty query returns nothing.
pub fn search<'a>(records: &'a [Perfume], query: &str, limit: usize) -> Vec<&'a Perfume> {
    search_with(&RelevanceScorer::default(), records, query, limit)
}

pub fn search_with<'a>(
    scorer: &RelevanceScorer,
    records: &'a [Perfume],
    query: &str,
    limit: usize,
) -> Vec<&'a Perfume> {
    let needle = fold_case(query);
    if needle.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<ScoredPerfume<'a>> = records
        .iter()
        .map(|perfume| ScoredPerfume { perfume, score: scorer.score(perfume, &needle) })
        .filter(|candidate| candidate.score > 0)
        .collect();

    scored.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| b.perfume.popularity_score.total_cmp(&a.perfume.popularity_score))
    });

    tracing::debug!(query, matches = scored.len(), limit, "typeahead search");

    scored.into_iter().take(limit).map(|candidate| candidate.perfume).collect()
}

/// Unscored lookup over name, brand, notes and accords, in catalog order.
pub fn quick_match<'a>(records: &'a [Perfume], query: &str, limit: usize) -> Vec<&'a Perfume> {
    let needle = fold_case(query);
    if needle.is_empty() {
        return Vec::new();
    }

    records
        .iter()
        .filter(|perfume| {
            fold_case(&perfume.name).contains(&needle)
                || fold_case(&perfume.brand).contains(&needle)
                || perfume.notes().any(|note| fold_case(note).contains(&needle))
                || perfume.accords.iter().any(|accord| fold_case(accord).contains(&needle))
        })
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{quick_match, search};
    use crate::domain::perfume::{Gender, Perfume, PerfumeId};

    fn perfume(id: &str, name: &str, description: &str, popularity: f64) -> Perfume {
        Perfume {
            id: PerfumeId::from(id),
            brand: "Casa".to_owned(),
            name: name.to_owned(),
            description: description.to_owned(),
            gender: Gender::Unisex,
            season: Vec::new(),
            notes_top: Vec::new(),
            notes_middle: Vec::new(),
            notes_base: Vec::new(),
            accords: vec!["amaderado".to_owned()],
            rating_avg: 4.0,
            votes: 0,
            popularity_score: popularity,
            release_year: 2020,
            longevity: 50,
            sillage: 50,
        }
    }

    fn ids(records: &[&Perfume]) -> Vec<String> {
        records.iter().map(|perfume| perfume.id.to_string()).collect()
    }

    #[test]
    fn exact_name_outranks_description_only_match() {
        let records = vec![
            perfume("desc", "Otro", "con ámbar dorado", 99.0),
            perfume("exact", "Ámbar", "", 1.0),
        ];
        assert_eq!(ids(&search(&records, "ámbar", 8)), vec!["exact", "desc"]);
    }

    #[test]
    fn ties_fall_back_to_popularity() {
        let records = vec![
            perfume("low", "Noche Azul", "", 10.0),
            perfume("high", "Noche Roja", "", 80.0),
        ];
        assert_eq!(ids(&search(&records, "noche", 8)), vec!["high", "low"]);
    }

    #[test]
    fn zero_scores_and_empty_queries_are_dropped() {
        let records = vec![perfume("a", "Uno", "", 1.0)];
        assert!(search(&records, "zzz", 8).is_empty());
        assert!(search(&records, "", 8).is_empty());
    }

    #[test]
    fn results_are_truncated_to_limit() {
        let records: Vec<_> =
            (0..12).map(|i| perfume(&format!("p{i}"), "Brisa", "", f64::from(i))).collect();
        let found = search(&records, "brisa", 8);
        assert_eq!(found.len(), 8);
        assert_eq!(found[0].id.as_str(), "p11");
    }

    #[test]
    fn quick_match_checks_accords_in_catalog_order() {
        let records = vec![perfume("a", "Uno", "", 1.0), perfume("b", "Dos", "", 50.0)];
        assert_eq!(ids(&quick_match(&records, "AMADERADO", 8)), vec!["a", "b"]);
        assert_eq!(ids(&quick_match(&records, "amaderado", 1)), vec!["a"]);
        assert!(quick_match(&records, "", 8).is_empty());
    }
}
