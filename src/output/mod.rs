//! Output module for reporting traversal results
//!
//! This module handles:
//! - Wrapping a `TraversalResult` into a timestamped `RunReport`
//! - Writing the report as JSON
//! - Printing the found path and a short summary to the console

mod console;
mod json;
mod traits;

pub use console::{format_summary, render_path, ConsoleOutput};
pub use json::{write_json_report, JsonFileOutput};
pub use traits::{OutputError, OutputHandler, OutputResult, RunReport};

/// Emits a report through every handler, stopping at the first failure
pub fn emit_all(handlers: &[&dyn OutputHandler], report: &RunReport) -> OutputResult<()> {
    for handler in handlers {
        handler.emit(report)?;
    }
    Ok(())
}
