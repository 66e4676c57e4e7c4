//! In-memory perfume catalog and the browse pipeline over it:
//! filter, then sort, then paginate.

pub mod filter;
pub mod pagination;
pub mod params;
pub mod sort;

use std::collections::BTreeSet;
use std::path::Path;

use serde::Serialize;

use crate::domain::perfume::{Perfume, PerfumeId};
use crate::loader::{self, LoadError};
use crate::text::format_count;

pub use filter::{filter, FilterCriteria};
pub use pagination::{
    page_count, page_links, paginate, PageControls, PageLink, DEFAULT_PAGE_SIZE,
};
pub use params::BrowseState;
pub use sort::{sort, SortKey};

/// Ordered, read-only collection of perfumes. Consumers impose their own order.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    perfumes: Vec<Perfume>,
}

impl Catalog {
    pub fn new(perfumes: Vec<Perfume>) -> Self {
        Self { perfumes }
    }

    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        loader::parse_records(json).map(Self::new)
    }

    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let catalog = loader::load_from_path(path).map(Self::new)?;
        tracing::info!(path = %path.display(), perfumes = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    /// Like [`Catalog::load`], but a failed load yields an empty catalog.
    pub fn load_or_empty(path: &Path) -> Self {
        Self::load(path).unwrap_or_else(|error| {
            tracing::warn!(
                path = %path.display(),
                error = %error,
                "catalog load failed, continuing with an empty catalog"
            );
            Self::default()
        })
    }

    pub fn perfumes(&self) -> &[Perfume] {
        &self.perfumes
    }

    pub fn len(&self) -> usize {
        self.perfumes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.perfumes.is_empty()
    }

    pub fn find(&self, id: &PerfumeId) -> Option<&Perfume> {
        self.perfumes.iter().find(|perfume| &perfume.id == id)
    }

    /// Every note across all tiers, de-duplicated and sorted.
    pub fn all_notes(&self) -> Vec<&str> {
        self.perfumes
            .iter()
            .flat_map(Perfume::notes)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn all_brands(&self) -> Vec<&str> {
        self.perfumes
            .iter()
            .map(|perfume| perfume.brand.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Filter, sort by `criteria.sort`, then cut out `page`.
    pub fn browse(
        &self,
        criteria: &FilterCriteria,
        page: usize,
        page_size: usize,
    ) -> CatalogPage<'_> {
        let matched = filter(&self.perfumes, criteria);
        let ordered = sort(matched, criteria.sort);
        let total_results = ordered.len();
        let total_pages = page_count(total_results, page_size);
        let controls = PageControls::new(page, total_pages);
        let items = paginate(&ordered, controls.current, page_size).to_vec();

        tracing::debug!(
            query = %criteria.query,
            sort = %criteria.sort,
            page = controls.current,
            shown = items.len(),
            total_results,
            "catalog browse"
        );

        CatalogPage { items, total_results, controls }
    }
}

/// One rendered page of browse results.
#[derive(Clone, Debug, Serialize)]
pub struct CatalogPage<'a> {
    pub items: Vec<&'a Perfume>,
    pub total_results: usize,
    pub controls: PageControls,
}

impl CatalogPage<'_> {
    pub fn results_label(&self) -> String {
        results_label(self.total_results)
    }
}

/// "1 perfume" / "N perfumes", with thousands grouping.
pub fn results_label(count: usize) -> String {
    let suffix = if count == 1 { "" } else { "s" };
    format!("{} perfume{suffix}", format_count(count as u64))
}

#[cfg(test)]
mod tests {
    use super::{results_label, Catalog, FilterCriteria, SortKey};
    use crate::domain::perfume::{Gender, Perfume, PerfumeId, Season};

    fn perfume(id: &str, brand: &str, gender: Gender, popularity: f64, notes: &[&str]) -> Perfume {
        Perfume {
            id: PerfumeId::from(id),
            brand: brand.to_owned(),
            name: id.to_uppercase(),
            description: String::new(),
            gender,
            season: vec![Season::Fall],
            notes_top: notes.iter().map(|note| (*note).to_owned()).collect(),
            notes_middle: Vec::new(),
            notes_base: Vec::new(),
            accords: Vec::new(),
            rating_avg: 4.0,
            votes: 0,
            popularity_score: popularity,
            release_year: 2021,
            longevity: 50,
            sillage: 50,
        }
    }

    fn catalog() -> Catalog {
        Catalog::new(vec![
            perfume("a", "Noir", Gender::Male, 10.0, &["oud", "cuero"]),
            perfume("b", "Aqua", Gender::Female, 30.0, &["limón"]),
            perfume("c", "Noir", Gender::Unisex, 20.0, &["oud"]),
        ])
    }

    #[test]
    fn browse_filters_sorts_and_pages() {
        let catalog = catalog();
        let criteria = FilterCriteria::new().with_gender(["male"]).with_sort(SortKey::Popularity);

        let page = catalog.browse(&criteria, 1, 1);
        assert_eq!(page.total_results, 2);
        assert_eq!(page.controls.total_pages, 2);
        assert_eq!(page.items[0].id.as_str(), "c");
        assert!(page.controls.has_next);

        let second = catalog.browse(&criteria, 2, 1);
        assert_eq!(second.items[0].id.as_str(), "a");
    }

    #[test]
    fn browse_past_the_end_is_empty() {
        let catalog = catalog();
        let page = catalog.browse(&FilterCriteria::new(), 9, 12);
        assert!(page.items.is_empty());
        assert_eq!(page.total_results, 3);
    }

    #[test]
    fn notes_and_brands_are_unique_and_sorted() {
        let catalog = catalog();
        assert_eq!(catalog.all_notes(), vec!["cuero", "limón", "oud"]);
        assert_eq!(catalog.all_brands(), vec!["Aqua", "Noir"]);
    }

    #[test]
    fn find_resolves_ids() {
        let catalog = catalog();
        assert!(catalog.find(&PerfumeId::from("b")).is_some());
        assert!(catalog.find(&PerfumeId::from("zz")).is_none());
    }

    #[test]
    fn load_or_empty_degrades_on_missing_file() {
        let catalog = Catalog::load_or_empty(std::path::Path::new("/nonexistent/perfumes.json"));
        assert!(catalog.is_empty());
    }

    #[test]
    fn results_label_pluralises() {
        assert_eq!(results_label(0), "0 perfumes");
        assert_eq!(results_label(1), "1 perfume");
        assert_eq!(results_label(12500), "12.500 perfumes");
    }
}
