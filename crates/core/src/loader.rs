//! Normalises upstream perfume payloads into [`Perfume`] records.
//!
//! The HTTP API has shipped both lowerCamelCase and snake_case field names
//! over time, so every aliased field is read under both spellings and the
//! camelCase one wins when both are present. Missing or null fields take the
//! defaults below.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::domain::perfume::{Gender, Perfume, PerfumeId, Season};

pub const DEFAULT_RELEASE_YEAR: i32 = 2024;
pub const DEFAULT_INTENSITY: u8 = 50;
pub const MAX_RATING: f64 = 5.0;
pub const MAX_INTENSITY: f64 = 100.0;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read catalog file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse catalog payload: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("catalog record #{index} is invalid: {reason}")]
    InvalidRecord { index: usize, reason: String },
}

/// Reads and normalises a JSON array of perfumes from disk.
pub fn load_from_path(path: &Path) -> Result<Vec<Perfume>, LoadError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| LoadError::ReadFile { path: path.to_path_buf(), source })?;
    parse_records(&raw)
}

/// Parses a JSON array of perfumes. Records with an id already seen are
/// dropped so ids stay unique; the first occurrence wins.
pub fn parse_records(json: &str) -> Result<Vec<Perfume>, LoadError> {
    let values: Vec<serde_json::Value> = serde_json::from_str(json)?;
    let mut seen = HashSet::with_capacity(values.len());
    let mut records = Vec::with_capacity(values.len());

    for (index, value) in values.into_iter().enumerate() {
        let raw: RawPerfume = serde_json::from_value(value)
            .map_err(|error| LoadError::InvalidRecord { index, reason: error.to_string() })?;
        let perfume = normalize(raw)
            .map_err(|reason| LoadError::InvalidRecord { index, reason: reason.to_owned() })?;

        if !seen.insert(perfume.id.clone()) {
            tracing::warn!(id = %perfume.id, index, "dropping perfume with duplicate id");
            continue;
        }
        records.push(perfume);
    }

    tracing::debug!(records = records.len(), "normalised catalog payload");
    Ok(records)
}

/// Upstream shape before normalisation.
#[derive(Debug, Default, Deserialize)]
pub struct RawPerfume {
    id: Option<String>,
    brand: Option<String>,
    name: Option<String>,
    description: Option<String>,
    gender: Option<String>,
    #[serde(alias = "seasons")]
    season: Option<Vec<String>>,
    #[serde(rename = "notesTop")]
    notes_top: Option<Vec<String>>,
    #[serde(rename = "notes_top")]
    notes_top_snake: Option<Vec<String>>,
    #[serde(rename = "notesMiddle")]
    notes_middle: Option<Vec<String>>,
    #[serde(rename = "notes_middle")]
    notes_middle_snake: Option<Vec<String>>,
    #[serde(rename = "notesBase")]
    notes_base: Option<Vec<String>>,
    #[serde(rename = "notes_base")]
    notes_base_snake: Option<Vec<String>>,
    accords: Option<Vec<String>>,
    #[serde(rename = "ratingAvg")]
    rating_avg: Option<f64>,
    #[serde(rename = "rating_avg")]
    rating_avg_snake: Option<f64>,
    votes: Option<u64>,
    #[serde(rename = "popularityScore")]
    popularity_score: Option<f64>,
    #[serde(rename = "popularity_score")]
    popularity_score_snake: Option<f64>,
    #[serde(rename = "releaseYear")]
    release_year: Option<i64>,
    #[serde(rename = "release_year")]
    release_year_snake: Option<i64>,
    longevity: Option<f64>,
    sillage: Option<f64>,
}

/// Applies the default table. Fails only when the record has no usable id.
/// A present camelCase field wins over its snake_case twin, zero included.
pub fn normalize(raw: RawPerfume) -> Result<Perfume, &'static str> {
    let id = raw.id.map(|id| id.trim().to_owned()).filter(|id| !id.is_empty());
    let Some(id) = id else {
        return Err("missing id");
    };

    let gender = match raw.gender.as_deref() {
        None => Gender::Unspecified,
        Some(value) => Gender::parse(value).unwrap_or_else(|| {
            tracing::warn!(id = %id, gender = value, "unrecognised gender, leaving unspecified");
            Gender::Unspecified
        }),
    };

    let mut season = Vec::new();
    for value in raw.season.unwrap_or_default() {
        match Season::parse(&value) {
            Some(parsed) if !season.contains(&parsed) => season.push(parsed),
            Some(_) => {}
            None => tracing::warn!(id = %id, season = %value, "dropping unrecognised season"),
        }
    }

    let rating = raw.rating_avg.or(raw.rating_avg_snake).unwrap_or(0.0);
    let release_year = raw
        .release_year
        .or(raw.release_year_snake)
        .map_or(DEFAULT_RELEASE_YEAR, |year| i32::try_from(year).unwrap_or(DEFAULT_RELEASE_YEAR));

    Ok(Perfume {
        id: PerfumeId(id),
        brand: raw.brand.unwrap_or_default(),
        name: raw.name.unwrap_or_default(),
        description: raw.description.unwrap_or_default(),
        gender,
        season,
        notes_top: raw.notes_top.or(raw.notes_top_snake).unwrap_or_default(),
        notes_middle: raw.notes_middle.or(raw.notes_middle_snake).unwrap_or_default(),
        notes_base: raw.notes_base.or(raw.notes_base_snake).unwrap_or_default(),
        accords: raw.accords.unwrap_or_default(),
        rating_avg: rating.clamp(0.0, MAX_RATING),
        votes: raw.votes.map_or(0, |votes| u32::try_from(votes).unwrap_or(u32::MAX)),
        popularity_score: raw.popularity_score.or(raw.popularity_score_snake).unwrap_or(0.0),
        release_year,
        longevity: intensity(raw.longevity),
        sillage: intensity(raw.sillage),
    })
}

fn intensity(value: Option<f64>) -> u8 {
    value.map_or(DEFAULT_INTENSITY, |value| value.clamp(0.0, MAX_INTENSITY).round() as u8)
}
