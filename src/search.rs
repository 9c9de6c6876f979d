//! Search orchestration.

use std::sync::Arc;

use tracing::debug;
use url::Url;

use crate::fetcher::PageFetcher;
use crate::{LinkExtractor, Markers, QueryEndpoint, Result, SearchQuery, SearchResults};

/// Runs a query against a search endpoint and extracts the result links.
pub struct Search {
    fetcher: Arc<dyn PageFetcher>,
    endpoint: QueryEndpoint,
    extractor: LinkExtractor,
}

impl Search {
    /// Creates a search using the default endpoint and markers.
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self {
            fetcher,
            endpoint: QueryEndpoint::default(),
            extractor: LinkExtractor::new(),
        }
    }

    /// Sets the query endpoint.
    pub fn with_endpoint(mut self, endpoint: QueryEndpoint) -> Self {
        self.endpoint = endpoint;
        self
    }

    /// Sets the result markers.
    pub fn with_markers(mut self, markers: Markers) -> Result<Self> {
        self.extractor = LinkExtractor::with_markers(markers)?;
        Ok(self)
    }

    /// Returns the page fetcher, so the same client can archive the results.
    pub fn fetcher(&self) -> Arc<dyn PageFetcher> {
        Arc::clone(&self.fetcher)
    }

    /// Returns the URL a query would be sent to.
    pub fn url_for(&self, query: &SearchQuery) -> Result<Url> {
        query.to_url(&self.endpoint)
    }

    /// Downloads the results page for `query` and extracts its links.
    pub async fn search(&self, query: &SearchQuery) -> Result<SearchResults> {
        let url = self.url_for(query)?;
        debug!("Searching {}", url);

        let html = self.fetcher.fetch(&url).await?;
        debug!("Downloaded {} bytes", html.len());

        let links = self.extractor.extract(&html)?;
        Ok(SearchResults::new(url, links))
    }
}
