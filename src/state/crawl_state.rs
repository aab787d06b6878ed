//! Crawl state machine for a single traversal run
//!
//! A run moves `Seeded -> Running` and ends in exactly one terminal state.
//! Emitting the result is the side effect of entering a terminal state, so a
//! run can never produce two results.

use crate::DegreesError;
use serde::Serialize;
use std::fmt;

/// Represents the lifecycle state of a traversal run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlState {
    // ===== Active States =====
    /// The start page has been fetched and recorded as the root
    Seeded,

    /// Frontier entries are being fetched and expanded
    Running,

    // ===== Terminal States =====
    /// The target was discovered
    Succeeded,

    /// The frontier drained without reaching the target
    ///
    /// Entries past `max_depth` are dropped one at a time while running; they
    /// never end the run on their own.
    Exhausted,
}

impl CrawlState {
    /// Returns true if the run is over
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Exhausted)
    }

    /// Returns true if this state can move to `next`
    pub fn can_transition_to(&self, next: CrawlState) -> bool {
        matches!(
            (self, next),
            (Self::Seeded, Self::Running)
                | (Self::Seeded, Self::Succeeded)
                | (Self::Running, Self::Succeeded)
                | (Self::Running, Self::Exhausted)
        )
    }

    /// Moves to `next`, rejecting transitions the machine does not allow
    pub fn transition(&mut self, next: CrawlState) -> Result<(), DegreesError> {
        if !self.can_transition_to(next) {
            return Err(DegreesError::InvalidTransition {
                from: *self,
                to: next,
            });
        }
        *self = next;
        Ok(())
    }

    /// The reported outcome of a terminal state
    pub fn outcome(&self) -> Option<TraversalOutcome> {
        match self {
            Self::Succeeded => Some(TraversalOutcome::Found),
            Self::Exhausted => Some(TraversalOutcome::Exhausted),
            Self::Seeded | Self::Running => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Seeded => "seeded",
            Self::Running => "running",
            Self::Succeeded => "succeeded",
            Self::Exhausted => "exhausted",
        }
    }
}

impl fmt::Display for CrawlState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a traversal ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TraversalOutcome {
    Found,
    Exhausted,
}

impl TraversalOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Found => "found",
            Self::Exhausted => "exhausted",
        }
    }
}

impl fmt::Display for TraversalOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
