//! Search query representation and URL encoding.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::{Result, SearchError};

/// Usage line printed when no search terms are given.
pub const USAGE: &str = "usage: serp-archive query ...";

/// Where a query is sent: `<scheme>://<host><path>?<parameter>=<terms>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryEndpoint {
    /// URL scheme.
    pub scheme: String,
    /// Search engine host.
    pub host: String,
    /// Path of the search page.
    pub path: String,
    /// Name of the query-string parameter carrying the terms.
    pub parameter: String,
}

impl Default for QueryEndpoint {
    fn default() -> Self {
        Self {
            scheme: "http".to_string(),
            host: "www.google.com".to_string(),
            path: "/search".to_string(),
            parameter: "q".to_string(),
        }
    }
}

/// An ordered, non-empty list of search terms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchQuery {
    terms: Vec<String>,
}

impl SearchQuery {
    /// Creates a query from the given terms.
    ///
    /// Returns [`SearchError::Usage`] when `terms` is empty.
    pub fn new<I, S>(terms: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let terms: Vec<String> = terms.into_iter().map(Into::into).collect();
        if terms.is_empty() {
            return Err(SearchError::Usage(USAGE.to_string()));
        }
        Ok(Self { terms })
    }

    /// Returns the raw terms.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Percent-encodes every term and joins them with a literal `+`.
    pub fn encoded(&self) -> String {
        self.terms
            .iter()
            .map(|term| urlencoding::encode(term).into_owned())
            .collect::<Vec<_>>()
            .join("+")
    }

    /// Builds the search URL for this query. The terms are the only
    /// query-string parameter.
    pub fn to_url(&self, endpoint: &QueryEndpoint) -> Result<Url> {
        let base = format!("{}://{}{}", endpoint.scheme, endpoint.host, endpoint.path);
        let mut url = Url::parse(&base)
            .map_err(|e| SearchError::InvalidEndpoint(format!("{}: {}", base, e)))?;
        url.set_query(Some(&format!("{}={}", endpoint.parameter, self.encoded())));
        Ok(url)
    }
}
