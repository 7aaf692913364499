//! In-memory storefront used by unit tests

use crate::client::dom::select_elements;
use crate::client::{ClientError, ClientResult, Element, PageClient, PageClientFactory};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

const MISSING_PAGE: &str = "<html><head><title>Not Found</title></head><body></body></html>";

/// What happened to a `StaticSite` across all of its clients
#[derive(Debug, Default)]
pub struct SiteLog {
    pub visits: Vec<String>,
    pub launches: usize,
    pub closes: usize,
}

/// A set of canned pages keyed by URL; also acts as the client factory
#[derive(Debug, Clone, Default)]
pub struct StaticSite {
    pages: HashMap<String, String>,
    unreachable: HashSet<String>,
    log: Arc<Mutex<SiteLog>>,
}

impl StaticSite {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    /// Navigating to `url` fails with a client error
    pub fn unreachable(mut self, url: &str) -> Self {
        self.unreachable.insert(url.to_string());
        self
    }

    pub fn visits(&self) -> Vec<String> {
        self.log.lock().unwrap().visits.clone()
    }

    pub fn launches(&self) -> usize {
        self.log.lock().unwrap().launches
    }

    pub fn closes(&self) -> usize {
        self.log.lock().unwrap().closes
    }

    pub fn client(&self) -> StaticPageClient {
        StaticPageClient {
            site: self.clone(),
            current: None,
            closed: false,
        }
    }
}

#[async_trait]
impl PageClientFactory for StaticSite {
    async fn launch(&self) -> ClientResult<Box<dyn PageClient>> {
        self.log.lock().unwrap().launches += 1;
        Ok(Box::new(self.client()))
    }
}

/// Page client over a `StaticSite`
pub struct StaticPageClient {
    site: StaticSite,
    current: Option<(String, String)>,
    closed: bool,
}

#[async_trait]
impl PageClient for StaticPageClient {
    async fn navigate(&mut self, url: &str) -> ClientResult<()> {
        if self.closed {
            return Err(ClientError::Closed);
        }
        self.site.log.lock().unwrap().visits.push(url.to_string());

        if self.site.unreachable.contains(url) {
            return Err(ClientError::Other(format!("{} is unreachable", url)));
        }

        let body = self
            .site
            .pages
            .get(url)
            .cloned()
            .unwrap_or_else(|| MISSING_PAGE.to_string());
        self.current = Some((url.to_string(), body));
        Ok(())
    }

    async fn wait_for(&mut self, selector: &str, _timeout: Duration) -> ClientResult<bool> {
        Ok(!self.find_all(selector)?.is_empty())
    }

    fn find_all(&self, selector: &str) -> ClientResult<Vec<Element>> {
        let (_, body) = self.current.as_ref().ok_or(ClientError::NoPage)?;
        select_elements(body, selector)
    }

    fn current_url(&self) -> Option<&str> {
        self.current.as_ref().map(|(url, _)| url.as_str())
    }

    async fn close(&mut self) -> ClientResult<()> {
        self.closed = true;
        self.site.log.lock().unwrap().closes += 1;
        Ok(())
    }
}
