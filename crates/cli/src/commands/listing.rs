//! Facet listings used to build the note and brand pickers.

use scentdex_core::config::LoadOptions;

use super::{load_runtime, CommandResult};

pub fn notes(options: &LoadOptions) -> CommandResult {
    let runtime = match load_runtime("notes", options) {
        Ok(runtime) => runtime,
        Err(result) => return result,
    };
    let notes = runtime.catalog.all_notes();
    CommandResult::success_with_data("notes", format!("{} distinct notes", notes.len()), notes)
}

pub fn brands(options: &LoadOptions) -> CommandResult {
    let runtime = match load_runtime("brands", options) {
        Ok(runtime) => runtime,
        Err(result) => return result,
    };
    let brands = runtime.catalog.all_brands();
    CommandResult::success_with_data("brands", format!("{} brands", brands.len()), brands)
}
