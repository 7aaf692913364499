//! HTTP page client
//!
//! This module implements `PageClient` over plain HTTP:
//! - Building the reqwest client with the configured user agent and timeouts
//! - GET requests that load a page into memory
//! - Selector waits that reload the page until it matches or time runs out
//! - Static DOM queries through scraper

use crate::client::dom::select_elements;
use crate::client::{ClientError, ClientResult, Element, PageClient, PageClientFactory};
use crate::config::ClientConfig;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tokio::time::Instant;

/// Reloads attempted by `wait_for` before giving up on a selector
const MAX_WAIT_RELOADS: usize = 1;

/// A page held in memory after a successful load
#[derive(Debug, Clone)]
struct LoadedPage {
    /// Final URL after redirects
    url: String,
    /// HTTP status code
    status_code: u16,
    /// Page body content
    body: String,
}

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use sku_sweep::config::ClientConfig;
/// use sku_sweep::client::build_http_client;
///
/// let client = build_http_client(&ClientConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &ClientConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Page client that fetches server-rendered HTML
pub struct HttpPageClient {
    client: Option<Client>,
    page: Option<LoadedPage>,
    poll_interval: Duration,
}

impl HttpPageClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = build_http_client(config).map_err(ClientError::Build)?;
        Ok(Self {
            client: Some(client),
            page: None,
            poll_interval: Duration::from_millis(config.poll_interval_ms),
        })
    }

    /// Status code of the current page
    pub fn status_code(&self) -> Option<u16> {
        self.page.as_ref().map(|page| page.status_code)
    }

    async fn load(&self, url: &str) -> ClientResult<LoadedPage> {
        let client = self.client.as_ref().ok_or(ClientError::Closed)?;

        let navigation_error = |source| ClientError::Navigation {
            url: url.to_string(),
            source,
        };

        let response = client.get(url).send().await.map_err(navigation_error)?;
        let status_code = response.status().as_u16();
        let final_url = response.url().to_string();

        // Error pages still render; the extractor decides what they mean
        if !response.status().is_success() {
            tracing::debug!("{} answered HTTP {}", url, status_code);
        }

        let body = response.text().await.map_err(navigation_error)?;

        Ok(LoadedPage {
            url: final_url,
            status_code,
            body,
        })
    }

    fn matches(&self, selector: &str) -> ClientResult<bool> {
        Ok(!self.find_all(selector)?.is_empty())
    }
}

#[async_trait]
impl PageClient for HttpPageClient {
    async fn navigate(&mut self, url: &str) -> ClientResult<()> {
        let page = self.load(url).await?;
        self.page = Some(page);
        Ok(())
    }

    async fn wait_for(&mut self, selector: &str, timeout: Duration) -> ClientResult<bool> {
        if self.matches(selector)? {
            return Ok(true);
        }

        // Same URL, bounded by MAX_WAIT_RELOADS
        let deadline = Instant::now() + timeout;
        for _ in 0..MAX_WAIT_RELOADS {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            tokio::time::sleep(self.poll_interval.min(deadline - now)).await;

            let url = self.current_url().ok_or(ClientError::NoPage)?.to_string();
            match self.load(&url).await {
                Ok(page) => self.page = Some(page),
                Err(ClientError::Closed) => return Err(ClientError::Closed),
                Err(e) => tracing::debug!("Reload while waiting for {} failed: {}", selector, e),
            }

            if self.matches(selector)? {
                return Ok(true);
            }
        }

        Ok(false)
    }

    fn find_all(&self, selector: &str) -> ClientResult<Vec<Element>> {
        let page = self.page.as_ref().ok_or(ClientError::NoPage)?;
        select_elements(&page.body, selector)
    }

    fn current_url(&self) -> Option<&str> {
        self.page.as_ref().map(|page| page.url.as_str())
    }

    async fn close(&mut self) -> ClientResult<()> {
        if self.client.take().is_none() {
            return Err(ClientError::Closed);
        }
        self.page = None;
        Ok(())
    }
}

/// Launches a new `HttpPageClient` per session
#[derive(Debug, Clone)]
pub struct HttpClientFactory {
    config: ClientConfig,
}

impl HttpClientFactory {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl PageClientFactory for HttpClientFactory {
    async fn launch(&self) -> ClientResult<Box<dyn PageClient>> {
        Ok(Box::new(HttpPageClient::new(&self.config)?))
    }
}
