use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PerfumeId(pub String);

impl PerfumeId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PerfumeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PerfumeId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Unisex,
    /// Missing or unrecognised upstream value. Never matches a gender filter.
    Unspecified,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Unisex => "unisex",
            Self::Unspecified => "unspecified",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "male" => Some(Self::Male),
            "female" => Some(Self::Female),
            "unisex" => Some(Self::Unisex),
            _ => None,
        }
    }

    /// Equal genders, or either side unisex.
    pub fn is_compatible_with(&self, other: &Gender) -> bool {
        self == other || *self == Self::Unisex || *other == Self::Unisex
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Spring => "spring",
            Self::Summer => "summer",
            Self::Fall => "fall",
            Self::Winter => "winter",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "spring" => Some(Self::Spring),
            "summer" => Some(Self::Summer),
            "fall" | "autumn" => Some(Self::Fall),
            "winter" => Some(Self::Winter),
            _ => None,
        }
    }
}

/// One catalog entry. Immutable once loaded into a [`crate::catalog::Catalog`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Perfume {
    pub id: PerfumeId,
    pub brand: String,
    pub name: String,
    pub description: String,
    pub gender: Gender,
    pub season: Vec<Season>,
    pub notes_top: Vec<String>,
    pub notes_middle: Vec<String>,
    pub notes_base: Vec<String>,
    pub accords: Vec<String>,
    pub rating_avg: f64,
    pub votes: u32,
    pub popularity_score: f64,
    pub release_year: i32,
    pub longevity: u8,
    pub sillage: u8,
}

impl Perfume {
    /// Top, middle and base notes in display order, duplicates included.
    pub fn notes(&self) -> impl Iterator<Item = &str> + '_ {
        self.notes_top
            .iter()
            .chain(self.notes_middle.iter())
            .chain(self.notes_base.iter())
            .map(String::as_str)
    }

    pub fn has_note(&self, note: &str) -> bool {
        self.notes().any(|candidate| candidate == note)
    }

    pub fn in_season(&self, season: &str) -> bool {
        self.season.iter().any(|candidate| candidate.as_str() == season)
    }

    pub fn display_name(&self) -> String {
        format!("{} - {}", self.brand, self.name)
    }
}
