//! HTTP-based page fetcher using reqwest.

use async_trait::async_trait;
use reqwest::header::LOCATION;
use reqwest::{redirect, Client, Proxy, Response};
use tracing::debug;
use url::Url;

use crate::fetcher::PageFetcher;
use crate::{Result, SearchError};

/// Browser-like User-Agent sent with every request. Search engines answer
/// 403 Forbidden to unknown clients.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows; U; Windows NT 6.1; en-US)";

/// Settings for [`HttpFetcher`].
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// User-Agent header value.
    pub user_agent: String,
    /// Proxy URL applied to all requests (e.g. `socks5://127.0.0.1:1080`).
    pub proxy: Option<String>,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            proxy: None,
        }
    }
}

impl FetcherConfig {
    /// Validates this configuration.
    pub fn validate(&self) -> Result<()> {
        if self.user_agent.trim().is_empty() {
            return Err(SearchError::Config("user_agent must not be empty".into()));
        }
        if let Some(proxy) = &self.proxy {
            Url::parse(proxy)
                .map_err(|e| SearchError::Config(format!("invalid proxy URL '{}': {}", proxy, e)))?;
        }
        Ok(())
    }
}

/// A page fetcher that uses plain HTTP requests via reqwest.
///
/// Automatic redirects are disabled. A `Location` header on the first
/// response is followed exactly once; whatever the second request returns
/// is final.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a new `HttpFetcher` with default settings.
    pub fn new() -> Result<Self> {
        Self::with_config(&FetcherConfig::default())
    }

    /// Creates a new `HttpFetcher` from the given configuration.
    pub fn with_config(config: &FetcherConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = Client::builder()
            .user_agent(config.user_agent.as_str())
            .redirect(redirect::Policy::none());

        builder = match &config.proxy {
            Some(proxy) => builder.proxy(
                Proxy::all(proxy.as_str())
                    .map_err(|e| SearchError::Config(format!("invalid proxy '{}': {}", proxy, e)))?,
            ),
            None => builder.no_proxy(),
        };

        let client = builder
            .build()
            .map_err(|e| SearchError::Config(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    /// Creates an `HttpFetcher` with a custom reqwest client.
    ///
    /// The client should have automatic redirects disabled, otherwise the
    /// single-hop `Location` handling never sees a redirect.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    async fn get(&self, url: &Url) -> Result<Response> {
        debug!("GET {}", url);
        self.client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| SearchError::Download {
                url: url.to_string(),
                source,
            })
    }
}

/// Returns the target of a non-empty `Location` header, resolved against
/// the URL that produced the response.
fn redirect_target(url: &Url, response: &Response) -> Result<Option<Url>> {
    let location = match response
        .headers()
        .get(LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
    {
        Some(location) if !location.is_empty() => location,
        _ => return Ok(None),
    };

    url.join(location).map(Some).map_err(|e| {
        SearchError::Other(format!(
            "Failed to download {}: invalid redirect '{}': {}",
            url, location, e
        ))
    })
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<String> {
        let mut response = self.get(url).await?;

        if let Some(target) = redirect_target(url, &response)? {
            debug!("Following redirect {} -> {}", url, target);
            response = self.get(&target).await?;
        }

        let final_url = response.url().to_string();
        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status {
                url: final_url,
                status,
            });
        }

        response
            .text()
            .await
            .map_err(|source| SearchError::Download {
                url: final_url,
                source,
            })
    }
}
