use scentdex_core::config::LoadOptions;
use scentdex_core::search::{quick_match, search};
use scentdex_core::Perfume;
use serde::Serialize;

use super::{load_runtime, CommandResult};

const COMMAND: &str = "search";

#[derive(Clone, Debug, Default)]
pub struct SearchRequest {
    pub query: String,
    pub limit: Option<usize>,
    /// Unscored match in catalog order instead of relevance ranking.
    pub quick: bool,
}

#[derive(Debug, Serialize)]
struct SearchData<'a> {
    query: &'a str,
    mode: &'static str,
    results: Vec<&'a Perfume>,
}

pub fn run(options: &LoadOptions, request: SearchRequest) -> CommandResult {
    let runtime = match load_runtime(COMMAND, options) {
        Ok(runtime) => runtime,
        Err(result) => return result,
    };

    let query = request.query.trim();
    let limit = request.limit.unwrap_or(runtime.config.catalog.search_limit);
    let mode = if request.quick { "quick" } else { "ranked" };
    let min_chars = runtime.config.catalog.min_query_chars;

    if query.chars().count() < min_chars {
        tracing::debug!(query, min_chars, "query below minimum length, skipping search");
        return CommandResult::success_with_data(
            COMMAND,
            format!("type at least {min_chars} characters to search"),
            SearchData { query, mode, results: Vec::new() },
        );
    }

    let records = runtime.catalog.perfumes();
    let results = if request.quick {
        quick_match(records, query, limit)
    } else {
        search(records, query, limit)
    };

    CommandResult::success_with_data(
        COMMAND,
        format!("{} matches for `{query}`", results.len()),
        SearchData { query, mode, results },
    )
}
