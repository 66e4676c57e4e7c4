use scentdex_core::catalog::{BrowseState, CatalogPage, SortKey};
use scentdex_core::config::LoadOptions;
use serde::Serialize;

use super::{load_runtime, CommandResult};

const COMMAND: &str = "browse";

/// Catalog page request. Explicit fields are applied on top of `params`.
#[derive(Clone, Debug, Default)]
pub struct BrowseRequest {
    pub params: Option<String>,
    pub query: Option<String>,
    pub gender: Vec<String>,
    pub season: Vec<String>,
    pub notes: Vec<String>,
    pub sort: Option<String>,
    pub page: Option<usize>,
}

#[derive(Debug, Serialize)]
struct BrowseData<'a> {
    #[serde(flatten)]
    page: CatalogPage<'a>,
    results_label: String,
    params: String,
}

pub fn run(options: &LoadOptions, request: BrowseRequest) -> CommandResult {
    let runtime = match load_runtime(COMMAND, options) {
        Ok(runtime) => runtime,
        Err(result) => return result,
    };

    let state = resolve_state(request);
    let page =
        runtime.catalog.browse(&state.criteria, state.page, runtime.config.catalog.page_size);
    let results_label = page.results_label();
    let message = format!(
        "{results_label}, page {} of {}",
        page.controls.current,
        page.controls.total_pages.max(1)
    );

    CommandResult::success_with_data(
        COMMAND,
        message,
        BrowseData { page, results_label, params: state.to_params() },
    )
}

fn resolve_state(request: BrowseRequest) -> BrowseState {
    let mut state =
        request.params.as_deref().map(BrowseState::from_params).unwrap_or_default();
    state.criteria = std::mem::take(&mut state.criteria)
        .with_gender(request.gender)
        .with_season(request.season)
        .with_notes(request.notes);
    let criteria = &mut state.criteria;

    if let Some(query) = request.query {
        criteria.query = query;
    }
    if let Some(sort) = request.sort {
        criteria.sort = SortKey::from_param(&sort);
    }
    if let Some(page) = request.page {
        state.page = page.max(1);
    }

    state
}
