//! Round-trips browse state through `key=value&...` parameter strings, the
//! same shape the catalog page keeps in its URL fragment.

use super::filter::{push_unique, FilterCriteria};
use super::sort::SortKey;

/// Filter criteria plus the requested page, as carried by a shareable link.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BrowseState {
    pub criteria: FilterCriteria,
    pub page: usize,
}

impl Default for BrowseState {
    fn default() -> Self {
        Self { criteria: FilterCriteria::default(), page: 1 }
    }
}

impl BrowseState {
    /// Parses `q=...&gender=a,b&season=...&notes=...&sort=...&page=N`.
    /// A leading `#` or `?` is ignored, unknown keys are skipped, and an
    /// unparseable or zero page becomes 1.
    pub fn from_params(raw: &str) -> Self {
        let mut state = Self::default();
        let raw = raw.trim_start_matches(&['#', '?'][..]);

        for part in raw.split('&') {
            let (key, value) = part.split_once('=').unwrap_or((part, ""));
            if key.is_empty() {
                continue;
            }
            let value = decode(value);

            match key {
                "q" => state.criteria.query = value,
                "gender" => state.criteria.gender = split_list(&value),
                "season" => state.criteria.season = split_list(&value),
                "notes" => state.criteria.notes = split_list(&value),
                "sort" => state.criteria.sort = SortKey::from_param(&value),
                "page" => {
                    state.page =
                        value.trim().parse::<usize>().ok().filter(|page| *page > 0).unwrap_or(1);
                }
                other => tracing::debug!(key = other, "ignoring unknown browse parameter"),
            }
        }

        state
    }

    /// Serialises back, omitting defaults (empty lists, popularity sort, page 1).
    pub fn to_params(&self) -> String {
        let criteria = &self.criteria;
        let mut parts = Vec::new();

        if !criteria.query.is_empty() {
            parts.push(format!("q={}", urlencoding::encode(&criteria.query)));
        }
        for (key, values) in
            [("gender", &criteria.gender), ("season", &criteria.season), ("notes", &criteria.notes)]
        {
            if !values.is_empty() {
                let joined = values.iter().map(String::as_str).collect::<Vec<_>>().join(",");
                parts.push(format!("{key}={}", urlencoding::encode(&joined)));
            }
        }
        if criteria.sort != SortKey::Popularity {
            parts.push(format!("sort={}", criteria.sort));
        }
        if self.page > 1 {
            parts.push(format!("page={}", self.page));
        }

        parts.join("&")
    }
}

fn decode(value: &str) -> String {
    urlencoding::decode(value)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| value.to_owned())
}

fn split_list(value: &str) -> Vec<String> {
    let mut list = Vec::new();
    push_unique(&mut list, value.split(',').filter(|item| !item.is_empty()));
    list
}
