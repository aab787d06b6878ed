//! Plain-text rendering of a run report
//!
//! The path goes to stdout on its own line (`A -> B -> C`) so it can be piped;
//! a short summary follows.

use crate::output::traits::{OutputHandler, OutputResult, RunReport};
use std::io::{self, Write};

/// Joins path titles with arrows
pub fn render_path(path: &[String]) -> String {
    path.join(" -> ")
}

/// Formats a report for the terminal
pub fn format_summary(report: &RunReport) -> String {
    let result = &report.result;
    let mut text = String::new();

    if result.success {
        text.push_str(&render_path(&result.path));
        text.push('\n');
        text.push_str(&format!(
            "{} degrees of separation between '{}' and '{}'\n",
            result.degrees, report.start, report.target
        ));
    } else if let Some(message) = &result.message {
        text.push_str(message);
        text.push('\n');
    }

    text.push_str(&format!(
        "Outcome: {}, fetched {} pages ({} dead ends), discovered {} in {:.2}s\n",
        result.outcome,
        result.stats.pages_fetched,
        result.stats.fetch_failures,
        result.stats.pages_discovered,
        report.elapsed_ms as f64 / 1000.0
    ));

    text
}

/// Output handler that prints the summary to stdout
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleOutput;

impl OutputHandler for ConsoleOutput {
    fn emit(&self, report: &RunReport) -> OutputResult<()> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(format_summary(report).as_bytes())?;
        stdout.flush()?;
        Ok(())
    }
}
