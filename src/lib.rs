//! Sku-Sweep: a resumable storefront price sweeper
//!
//! This crate reads a batch of product identifiers, looks each one up on a
//! storefront's search page, matches the product pages against the requested
//! SKU and appends normalized price records to a tab-separated dataset. A
//! durable checkpoint lets an interrupted batch pick up where it left off.

pub mod client;
pub mod config;
pub mod crawler;
pub mod extract;
pub mod output;
pub mod records;
pub mod session;
pub mod state;
pub mod storage;

use thiserror::Error;

/// Main error type for Sku-Sweep operations
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Page client error: {0}")]
    Client(#[from] client::ClientError),

    #[error("Session error: {0}")]
    Session(#[from] session::SessionError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Errors raised while parsing the input sequence
#[derive(Debug, Error)]
pub enum InputError {
    #[error("Malformed input on line {line_number}: expected {expected} tab-separated fields, found {found}")]
    Malformed {
        line_number: usize,
        expected: usize,
        found: usize,
    },
}

/// Result type alias for Sku-Sweep operations
pub type Result<T> = std::result::Result<T, SweepError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use records::{LookupStatus, PriceQuote, Request, ResultRecord};
pub use state::ResumeState;
