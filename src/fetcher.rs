//! Page fetcher abstraction for retrieving HTML content.

use async_trait::async_trait;
use url::Url;

use crate::Result;

/// Trait for fetching the full body of a URL as text.
///
/// All configuration (user-agent, proxy) is set at construction time;
/// `fetch` is a simple URL-in, body-out interface. Failures are reported
/// as [`SearchError::Download`](crate::SearchError::Download) or
/// [`SearchError::Status`](crate::SearchError::Status) naming the URL.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches the body of the given URL.
    async fn fetch(&self, url: &Url) -> Result<String>;
}
