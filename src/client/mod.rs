//! Page client abstraction
//!
//! The crawl engine only talks to the storefront through the `PageClient`
//! trait: load a URL, wait for a selector, and read text and attributes of
//! matched elements. This module contains:
//! - The `PageClient` and `PageClientFactory` traits
//! - `Element`, an owned snapshot of a matched DOM element
//! - `HttpPageClient`, a static-HTML implementation over reqwest + scraper

mod dom;
#[cfg(test)]
pub mod fixture;
mod http;

pub use dom::{select_elements, Element};
pub use http::{build_http_client, HttpClientFactory, HttpPageClient};

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Errors raised by a page client
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Navigation to {url} failed: {source}")]
    Navigation { url: String, source: reqwest::Error },

    #[error("Failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    #[error("Invalid CSS selector: {0}")]
    InvalidSelector(String),

    #[error("No page has been loaded yet")]
    NoPage,

    #[error("Page client has been closed")]
    Closed,

    #[error("{0}")]
    Other(String),
}

/// Result type for page client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// A single browsing session against the storefront
///
/// Implementations are stateful: `find_all` always queries the page loaded by
/// the most recent `navigate`. A client is not meant to be shared between
/// workers.
#[async_trait]
pub trait PageClient: Send {
    /// Loads `url`, replacing the current page
    async fn navigate(&mut self, url: &str) -> ClientResult<()>;

    /// Waits until `selector` matches on the current page
    ///
    /// Returns `Ok(false)` when `timeout` elapses first; a timeout is not an
    /// error.
    async fn wait_for(&mut self, selector: &str, timeout: Duration) -> ClientResult<bool>;

    /// Returns every element matching `selector`, in document order
    fn find_all(&self, selector: &str) -> ClientResult<Vec<Element>>;

    /// URL of the current page, after redirects
    fn current_url(&self) -> Option<&str>;

    /// Releases the underlying resources; the client is unusable afterwards
    async fn close(&mut self) -> ClientResult<()>;
}

/// Launches fresh page clients for the session manager
#[async_trait]
pub trait PageClientFactory: Send + Sync {
    async fn launch(&self) -> ClientResult<Box<dyn PageClient>>;
}
