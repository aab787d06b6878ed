//! State module for tracking traversal progress
//!
//! This module provides the per-run traversal memory and the run state machine.
//!
//! # Components
//!
//! - `PathTable`: First-discovery record (parent, depth, title) per page, used to rebuild paths
//! - `Frontier`: FIFO work queue plus the enqueued and visited sets
//! - `TraversalState`: The two above behind one owner, enforcing their shared invariants
//! - `CrawlState`: Lifecycle of a run (seeded, running, and the terminal outcomes)

mod crawl_state;
mod frontier;
mod path_table;
mod result;
mod traversal;

// Re-export main types
pub use crawl_state::{CrawlState, TraversalOutcome};
pub use frontier::{Frontier, FrontierEntry};
pub use path_table::{PageRecord, PathTable};
pub use result::{TraversalResult, TraversalStats};
pub use traversal::TraversalState;
