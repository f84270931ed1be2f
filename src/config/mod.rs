//! Configuration module for Regional Reels
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key is optional; missing keys fall back to the built-in defaults.
//!
//! # Example
//!
//! ```no_run
//! use regional_reels::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("reels.toml")).unwrap();
//! println!("Searching region: {}", config.search.region_code);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, OutputConfig, SearchConfig, SiteConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
