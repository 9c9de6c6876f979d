//! # serp-archive
//!
//! Runs a web search, pulls the result links out of the results page and
//! downloads every linked page into a local directory.
//!
//! Result links are found by scanning the page text for fixed markers
//! rather than by parsing HTML:
//!
//! - A heading marker opens each result block
//! - The link starts at the next `http`
//! - The link ends where the engine's `&amp;sa=U` tail begins
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use serp_archive::{Archiver, HttpFetcher, Search, SearchQuery};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let fetcher = Arc::new(HttpFetcher::new()?);
//!     let search = Search::new(fetcher.clone());
//!
//!     let query = SearchQuery::new(["rust", "programming"])?;
//!     let results = search.search(&query).await?;
//!     for link in results.links() {
//!         println!("  {}", link);
//!     }
//!
//!     let archiver = Archiver::new(fetcher, "html");
//!     for outcome in archiver.archive(results.links()).await? {
//!         match outcome {
//!             Ok(page) => println!("Downloaded: {}", page.url),
//!             Err(failure) => println!("{}", failure),
//!         }
//!     }
//!     Ok(())
//! }
//! ```

mod archive;
mod error;
mod extract;
mod query;
mod result;
mod search;

pub mod fetcher;
pub mod fetcher_http;

pub use archive::{file_name, ArchiveFailure, ArchiveOutcome, ArchivedPage, Archiver};
pub use error::{Result, SearchError};
pub use extract::{LinkExtractor, Markers};
pub use fetcher::PageFetcher;
pub use fetcher_http::{FetcherConfig, HttpFetcher, DEFAULT_USER_AGENT};
pub use query::{QueryEndpoint, SearchQuery, USAGE};
pub use result::{ResultLink, SearchResults};
pub use search::Search;
