//! Output handler traits and types
//!
//! This module defines the trait interface for output handlers and the
//! report they receive at the end of a run.

use crate::state::{TraversalOutcome, TraversalResult};
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output: {0}")]
    Write(String),

    #[error("Failed to format output: {0}")]
    Format(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Everything reported about one run
///
/// The traversal result is flattened, so the JSON keeps `success`, `path`,
/// `degrees` and `message` at the top level.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Start identifier as given
    pub start: String,

    /// Target identifier as given
    pub target: String,

    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub elapsed_ms: u64,

    /// SHA-256 of the configuration file, when one was loaded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_hash: Option<String>,

    #[serde(flatten)]
    pub result: TraversalResult,
}

impl RunReport {
    /// Builds a report for a run that started at `started_at` and just finished
    pub fn new(
        start: impl Into<String>,
        target: impl Into<String>,
        started_at: DateTime<Utc>,
        result: TraversalResult,
    ) -> Self {
        let finished_at = Utc::now();
        let elapsed_ms = (finished_at - started_at).num_milliseconds().max(0) as u64;

        Self {
            start: start.into(),
            target: target.into(),
            started_at,
            finished_at,
            elapsed_ms,
            config_hash: None,
            result,
        }
    }

    pub fn with_config_hash(mut self, hash: impl Into<String>) -> Self {
        self.config_hash = Some(hash.into());
        self
    }

    pub fn succeeded(&self) -> bool {
        self.result.success
    }

    pub fn outcome(&self) -> TraversalOutcome {
        self.result.outcome
    }
}

/// Trait for output handlers
///
/// Output handlers receive the final report of a run, exactly once.
pub trait OutputHandler {
    /// Emits the report
    ///
    /// # Arguments
    ///
    /// * `report` - The finished run's report
    fn emit(&self, report: &RunReport) -> OutputResult<()>;
}
