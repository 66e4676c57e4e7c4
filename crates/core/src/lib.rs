pub mod catalog;
pub mod config;
pub mod domain;
pub mod errors;
pub mod fixtures;
pub mod loader;
pub mod search;
pub mod suggestions;
pub mod text;

pub use catalog::{
    results_label, BrowseState, Catalog, CatalogPage, FilterCriteria, PageControls, PageLink,
    SortKey,
};
pub use config::{AppConfig, ConfigError, LoadOptions, LogFormat};
pub use domain::{Gender, Perfume, PerfumeId, Season};
pub use errors::{ApplicationError, DomainError, InterfaceError};
pub use loader::LoadError;
pub use search::{quick_match, search};
pub use suggestions::suggest;
