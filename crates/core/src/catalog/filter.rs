use serde::{Deserialize, Serialize};

use super::sort::SortKey;
use crate::domain::perfume::{Gender, Perfume};
use crate::text::fold_case;

/// Active constraints for one catalog query. Every empty field means "no constraint".
/// List values keep the order they were added in, without duplicates.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub query: String,
    pub gender: Vec<String>,
    pub season: Vec<String>,
    pub notes: Vec<String>,
    pub sort: SortKey,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_gender<I, S>(mut self, genders: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        push_unique(&mut self.gender, genders);
        self
    }

    pub fn with_season<I, S>(mut self, seasons: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        push_unique(&mut self.season, seasons);
        self
    }

    pub fn with_notes<I, S>(mut self, notes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        push_unique(&mut self.notes, notes);
        self
    }

    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    /// True when `perfume` passes every active category.
    pub fn matches(&self, perfume: &Perfume) -> bool {
        self.matches_query(perfume)
            && self.matches_gender(perfume)
            && self.matches_season(perfume)
            && self.matches_notes(perfume)
    }

    fn matches_query(&self, perfume: &Perfume) -> bool {
        if self.query.is_empty() {
            return true;
        }

        let needle = fold_case(&self.query);
        let text =
            fold_case(&format!("{} {} {}", perfume.brand, perfume.name, perfume.description));
        if text.contains(&needle) {
            return true;
        }

        let notes = fold_case(&perfume.notes().collect::<Vec<_>>().join(" "));
        notes.contains(&needle)
    }

    fn matches_gender(&self, perfume: &Perfume) -> bool {
        match perfume.gender {
            _ if self.gender.is_empty() => true,
            Gender::Unisex => true,
            Gender::Unspecified => false,
            gender => self.gender.iter().any(|value| value == gender.as_str()),
        }
    }

    fn matches_season(&self, perfume: &Perfume) -> bool {
        self.season.is_empty() || self.season.iter().any(|season| perfume.in_season(season))
    }

    fn matches_notes(&self, perfume: &Perfume) -> bool {
        self.notes.is_empty() || self.notes.iter().any(|note| perfume.has_note(note))
    }
}

/// Appends each value not already present, keeping first-seen order.
pub(crate) fn push_unique<I, S>(list: &mut Vec<String>, values: I)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    for value in values {
        let value = value.into();
        if !list.contains(&value) {
            list.push(value);
        }
    }
}

/// Keeps the records that satisfy `criteria`, in input order.
pub fn filter<'a, I>(records: I, criteria: &FilterCriteria) -> Vec<&'a Perfume>
where
    I: IntoIterator<Item = &'a Perfume>,
{
    records.into_iter().filter(|perfume| criteria.matches(perfume)).collect()
}
