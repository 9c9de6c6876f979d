//! Search result types.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

/// A result URL recovered from a search results page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultLink(Url);

impl ResultLink {
    /// Wraps an already validated URL.
    pub fn new(url: Url) -> Self {
        Self(url)
    }

    /// Returns the underlying URL.
    pub fn url(&self) -> &Url {
        &self.0
    }

    /// Returns the URL text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<Url> for ResultLink {
    fn from(url: Url) -> Self {
        Self(url)
    }
}

impl fmt::Display for ResultLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Links extracted from one search results page.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResults {
    /// The search URL that was downloaded.
    pub url: Url,
    /// Result links in document order.
    links: Vec<ResultLink>,
    /// Number of links.
    pub count: usize,
}

impl SearchResults {
    /// Creates a result container for the given search URL.
    pub fn new(url: Url, links: Vec<ResultLink>) -> Self {
        let count = links.len();
        Self { url, links, count }
    }

    /// Returns the links.
    pub fn links(&self) -> &[ResultLink] {
        &self.links
    }

    /// Consumes the container, returning the links.
    pub fn into_links(self) -> Vec<ResultLink> {
        self.links
    }

    /// Returns `true` if no links were found.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}
