//! Configuration module for Sumi-Degrees
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use sumi_degrees::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("degrees.toml")).unwrap();
//! println!("Traversal will stop after {} hops", config.crawler.max_depth);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, OutputConfig, SiteConfig, TraversalConfig, UserAgentConfig,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
