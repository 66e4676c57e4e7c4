use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::perfume::Perfume;
use crate::text::locale_cmp;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Popularity,
    Rating,
    Newest,
    Name,
    /// Unrecognised sort parameter; records keep their incoming order.
    #[serde(other)]
    Unsorted,
}

impl SortKey {
    /// Maps a request parameter onto a key. Blank falls back to popularity,
    /// anything unknown keeps the incoming order.
    pub fn from_param(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "popularity" => Self::Popularity,
            "rating" => Self::Rating,
            "newest" => Self::Newest,
            "name" => Self::Name,
            other => {
                tracing::debug!(sort = other, "unrecognised sort key, keeping input order");
                Self::Unsorted
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Popularity => "popularity",
            Self::Rating => "rating",
            Self::Newest => "newest",
            Self::Name => "name",
            Self::Unsorted => "unsorted",
        }
    }

    fn compare(&self, left: &Perfume, right: &Perfume) -> Ordering {
        match self {
            Self::Popularity => right.popularity_score.total_cmp(&left.popularity_score),
            Self::Rating => right.rating_avg.total_cmp(&left.rating_avg),
            Self::Newest => right.release_year.cmp(&left.release_year),
            Self::Name => locale_cmp(&left.name, &right.name),
            Self::Unsorted => Ordering::Equal,
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable sort into a new sequence; the input is left untouched.
pub fn sort<'a, I>(records: I, key: SortKey) -> Vec<&'a Perfume>
where
    I: IntoIterator<Item = &'a Perfume>,
{
    let mut sorted: Vec<&Perfume> = records.into_iter().collect();
    if key != SortKey::Unsorted {
        sorted.sort_by(|left, right| key.compare(left, right));
    }
    sorted
}

#[cfg(test)]
mod tests {
    use super::{sort, SortKey};
    use crate::domain::perfume::{Gender, Perfume, PerfumeId};

    fn perfume(id: &str, name: &str, rating: f64, popularity: f64, year: i32) -> Perfume {
        Perfume {
            id: PerfumeId::from(id),
            brand: "Marca".to_owned(),
            name: name.to_owned(),
            description: String::new(),
            gender: Gender::Unisex,
            season: Vec::new(),
            notes_top: Vec::new(),
            notes_middle: Vec::new(),
            notes_base: Vec::new(),
            accords: Vec::new(),
            rating_avg: rating,
            votes: 0,
            popularity_score: popularity,
            release_year: year,
            longevity: 50,
            sillage: 50,
        }
    }

    fn fixture() -> Vec<Perfume> {
        vec![
            perfume("a", "Zeste", 4.1, 70.0, 2021),
            perfume("b", "Éclat", 4.8, 90.0, 2023),
            perfume("c", "Ambre", 4.8, 70.0, 2020),
            perfume("d", "Encens", 3.9, 95.0, 2023),
        ]
    }

    fn ids(records: &[&Perfume]) -> Vec<String> {
        records.iter().map(|perfume| perfume.id.to_string()).collect()
    }

    #[test]
    fn popularity_is_descending_and_stable() {
        let records = fixture();
        assert_eq!(ids(&sort(&records, SortKey::Popularity)), vec!["d", "b", "a", "c"]);
    }

    #[test]
    fn rating_ties_keep_input_order() {
        let records = fixture();
        assert_eq!(ids(&sort(&records, SortKey::Rating)), vec!["b", "c", "a", "d"]);
    }

    #[test]
    fn newest_is_descending_by_year() {
        let records = fixture();
        assert_eq!(ids(&sort(&records, SortKey::Newest)), vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn name_is_locale_aware() {
        let records = fixture();
        assert_eq!(ids(&sort(&records, SortKey::Name)), vec!["c", "b", "d", "a"]);
    }

    #[test]
    fn unknown_param_passes_through() {
        let records = fixture();
        let key = SortKey::from_param("price");
        assert_eq!(key, SortKey::Unsorted);
        assert_eq!(ids(&sort(&records, key)), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn unknown_key_deserializes_as_unsorted() {
        let key: SortKey = serde_json::from_str("\"price\"").expect("unknown key should map");
        assert_eq!(key, SortKey::Unsorted);
        let key: SortKey = serde_json::from_str("\"rating\"").expect("rating should parse");
        assert_eq!(key, SortKey::Rating);
    }

    #[test]
    fn blank_param_defaults_to_popularity() {
        assert_eq!(SortKey::from_param(""), SortKey::Popularity);
        assert_eq!(SortKey::from_param("Rating"), SortKey::Rating);
    }
}
