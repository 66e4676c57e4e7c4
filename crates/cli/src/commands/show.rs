use scentdex_core::config::LoadOptions;
use scentdex_core::errors::{ApplicationError, DomainError};
use scentdex_core::PerfumeId;

use super::{load_runtime, CommandResult};

const COMMAND: &str = "show";

pub fn run(options: &LoadOptions, id: &str) -> CommandResult {
    let runtime = match load_runtime(COMMAND, options) {
        Ok(runtime) => runtime,
        Err(result) => return result,
    };

    let id = PerfumeId::from(id.trim());
    match runtime.catalog.find(&id) {
        Some(perfume) => CommandResult::success_with_data(COMMAND, perfume.display_name(), perfume),
        None => CommandResult::from_application_error(
            COMMAND,
            ApplicationError::from(DomainError::PerfumeNotFound(id)),
        ),
    }
}
