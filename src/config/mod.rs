//! Configuration module for Sku-Sweep
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key has a default, so running without a config file is supported.
//!
//! # Example
//!
//! ```no_run
//! use sku_sweep::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("sweep.toml")).unwrap();
//! println!("Reading requests from: {}", config.files.input_path);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    ClientConfig, Config, FilesConfig, LoggingConfig, SessionConfig, SiteConfig,
};

// Re-export parser functions
pub use parser::{compute_file_hash, load_config, load_config_with_hash};
pub use validation::{validate, QUERY_PLACEHOLDER};
