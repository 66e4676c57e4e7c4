use scentdex_core::config::LoadOptions;
use scentdex_core::errors::{ApplicationError, DomainError};
use scentdex_core::suggestions::suggest;
use scentdex_core::{Perfume, PerfumeId};
use serde::Serialize;

use super::{load_runtime, CommandResult};

const COMMAND: &str = "suggest";

#[derive(Debug, Serialize)]
struct SuggestData<'a> {
    reference: &'a Perfume,
    suggestions: Vec<&'a Perfume>,
}

pub fn run(options: &LoadOptions, id: &str, limit: Option<usize>) -> CommandResult {
    let runtime = match load_runtime(COMMAND, options) {
        Ok(runtime) => runtime,
        Err(result) => return result,
    };

    let id = PerfumeId::from(id.trim());
    let Some(reference) = runtime.catalog.find(&id) else {
        let error = ApplicationError::from(DomainError::PerfumeNotFound(id));
        return CommandResult::from_application_error(COMMAND, error);
    };

    let limit = limit.unwrap_or(runtime.config.catalog.suggestion_limit);
    let suggestions = suggest(runtime.catalog.perfumes(), &id, limit);

    CommandResult::success_with_data(
        COMMAND,
        format!("{} perfumes related to {}", suggestions.len(), reference.display_name()),
        SuggestData { reference, suggestions },
    )
}
