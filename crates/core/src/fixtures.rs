//! Bundled catalog shipped inside the binary.

use crate::catalog::Catalog;
use crate::loader::LoadError;

pub const SEED_CATALOG_JSON: &str = include_str!("../data/perfumes.json");

/// The bundled catalog, normalised the same way as an on-disk dataset.
pub fn seed_catalog() -> Result<Catalog, LoadError> {
    Catalog::from_json(SEED_CATALOG_JSON)
}

#[cfg(test)]
mod tests {
    use super::seed_catalog;
    use crate::domain::perfume::PerfumeId;

    #[test]
    fn seed_catalog_loads_every_record() {
        let catalog = seed_catalog().expect("bundled catalog should parse");
        assert_eq!(catalog.len(), 32);
        assert!(catalog.find(&PerfumeId::from("p001")).is_some());
        assert!(catalog.find(&PerfumeId::from("p032")).is_some());
    }
}
