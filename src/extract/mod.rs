//! Product matching and extraction
//!
//! This module resolves a request against the storefront:
//! - Submitting the search for the request's MPN
//! - Detecting which search result layout was served
//! - Visiting every candidate product page in display order
//! - Matching part numbers and reading price, condition and availability
//!
//! Everything that goes wrong on a single candidate page is contained here;
//! only a failed search navigation is reported to the caller.

mod layout;
mod normalize;
mod product;

pub use layout::{DetailLayout, SearchLayout, NOT_FOUND_TITLE, RESULTS_CONTAINER};
pub use normalize::{clean_price, normalize_sku, parse_label_value, skus_match};
pub use product::{inspect_candidate, CandidateOutcome};

use crate::client::{ClientResult, PageClient};
use crate::config::{SiteConfig, QUERY_PLACEHOLDER};
use crate::records::{PriceQuote, Request};
use crate::SweepError;
use std::time::Duration;
use url::Url;

/// Looks requests up on the storefront
#[derive(Debug, Clone)]
pub struct Extractor {
    search_url: String,
    wait_timeout: Duration,
}

impl Extractor {
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            search_url: config.search_url.clone(),
            wait_timeout: Duration::from_secs(config.wait_timeout_secs),
        }
    }

    /// Overrides the bound on every element wait
    pub fn with_wait_timeout(mut self, wait_timeout: Duration) -> Self {
        self.wait_timeout = wait_timeout;
        self
    }

    /// Builds the search URL for an MPN
    ///
    /// # Example
    ///
    /// ```
    /// use sku_sweep::config::SiteConfig;
    /// use sku_sweep::extract::Extractor;
    ///
    /// let config = SiteConfig {
    ///     search_url: "https://shop.example.com/search?q={query}".to_string(),
    ///     ..SiteConfig::default()
    /// };
    /// let extractor = Extractor::new(&config);
    /// let url = extractor.search_url(" 123 456/B21 ").unwrap();
    /// assert_eq!(url.as_str(), "https://shop.example.com/search?q=123+456%2FB21");
    /// ```
    pub fn search_url(&self, mpn: &str) -> Result<Url, url::ParseError> {
        let encoded: String = url::form_urlencoded::byte_serialize(mpn.trim().as_bytes()).collect();
        Url::parse(&self.search_url.replace(QUERY_PLACEHOLDER, &encoded))
    }

    /// Returns the accepted quotes for a request, in catalog display order
    ///
    /// # Lookup Flow
    ///
    /// 1. Search for the MPN and wait for the results container
    ///    - Timeout → warning, continue with what rendered
    /// 2. "Not found" page → no quotes
    /// 3. Detect the result layout → unknown layout means no quotes
    /// 4. Visit each candidate; keep matching products with a price
    ///
    /// # Errors
    ///
    /// Only failures of the search step itself are returned. Failures on a
    /// candidate page are logged and that candidate is dropped.
    pub async fn lookup(
        &self,
        client: &mut dyn PageClient,
        request: &Request,
    ) -> Result<Vec<PriceQuote>, SweepError> {
        let search_url = self.search_url(&request.mpn)?;
        tracing::info!("Search URL is {}", search_url);

        let candidates = self.search(client, &search_url).await?;
        tracing::debug!("{} candidate product(s) for {}", candidates.len(), request.strike_id);

        let mut quotes = Vec::new();
        for candidate in &candidates {
            match inspect_candidate(client, candidate.as_str(), &request.sku, self.wait_timeout).await {
                Ok(CandidateOutcome::Accepted(quote)) => quotes.push(quote),
                Ok(CandidateOutcome::Mismatch { .. }) => {}
                Ok(CandidateOutcome::NoPrice) => {
                    tracing::info!("Matching product at {} has no readable price", candidate);
                }
                Err(e) => {
                    tracing::error!(
                        "Exception occurred while getting the details of the product {}: {}",
                        candidate,
                        e
                    );
                }
            }
        }

        tracing::info!("Number of products found is {}", quotes.len());
        Ok(quotes)
    }

    /// Runs the search and collects candidate product URLs
    async fn search(&self, client: &mut dyn PageClient, search_url: &Url) -> ClientResult<Vec<Url>> {
        client.navigate(search_url.as_str()).await?;

        if is_not_found_page(&*client)? {
            tracing::info!("Search page reports no results");
            return Ok(Vec::new());
        }

        if !client.wait_for(RESULTS_CONTAINER, self.wait_timeout).await? {
            tracing::warn!("Timeout exception occurred in search page.");
        }

        let layout = match SearchLayout::detect(&*client)? {
            Some(layout) => layout,
            None => {
                tracing::warn!("Unrecognized search result layout at {}", search_url);
                return Ok(Vec::new());
            }
        };
        tracing::debug!("Detected {:?} search layout", layout);

        let base = client
            .current_url()
            .and_then(|u| Url::parse(u).ok())
            .unwrap_or_else(|| search_url.clone());

        let mut urls = Vec::new();
        for item in client.find_all(&layout.item_selector())? {
            let href = match item.find_first("a[href]")? {
                Some(link) => link.attribute("href").map(str::to_string),
                None => None,
            };
            match href.map(|h| base.join(h.trim())) {
                Some(Ok(url)) => urls.push(url),
                Some(Err(e)) => tracing::warn!("Skipping unparseable product link: {}", e),
                None => tracing::debug!("Search result without a product link"),
            }
        }

        Ok(urls)
    }
}

/// True if the current page is the storefront's "not found" page
fn is_not_found_page(client: &dyn PageClient) -> ClientResult<bool> {
    Ok(client
        .find_all("title")?
        .first()
        .map(|title| title.text().trim().eq_ignore_ascii_case(NOT_FOUND_TITLE))
        .unwrap_or(false))
}
