//! JSON report file
//!
//! Writes the run report as pretty-printed JSON, replacing any existing file.

use crate::output::traits::{OutputError, OutputHandler, OutputResult, RunReport};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Output handler that writes the report to a JSON file
#[derive(Debug, Clone)]
pub struct JsonFileOutput {
    path: PathBuf,
}

impl JsonFileOutput {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OutputHandler for JsonFileOutput {
    fn emit(&self, report: &RunReport) -> OutputResult<()> {
        write_json_report(report, &self.path)
    }
}

/// Writes `report` to `output_path`, creating parent directories as needed
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the report
/// * `Err(OutputError)` - Failed to serialize or write
pub fn write_json_report(report: &RunReport, output_path: &Path) -> OutputResult<()> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let file = File::create(output_path).map_err(|e| {
        OutputError::Write(format!("Cannot create {}: {}", output_path.display(), e))
    })?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, report)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    tracing::debug!("Wrote report to {}", output_path.display());
    Ok(())
}
