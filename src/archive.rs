//! Page archiving: download every result link into a numbered file.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use crate::fetcher::PageFetcher;
use crate::{Result, ResultLink, SearchError};

/// A page that was downloaded and written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchivedPage {
    /// Position of the link in the result list.
    pub index: usize,
    /// The link that was downloaded.
    pub url: ResultLink,
    /// File the body was written to.
    pub path: PathBuf,
}

/// A link that could not be archived.
#[derive(Error, Debug)]
#[error("{error}")]
pub struct ArchiveFailure {
    /// Position of the link in the result list.
    pub index: usize,
    /// The link that failed.
    pub url: ResultLink,
    /// Why it failed.
    #[source]
    pub error: SearchError,
}

/// Outcome of archiving a single link.
pub type ArchiveOutcome = std::result::Result<ArchivedPage, ArchiveFailure>;

/// Returns the file name used for the link at `index`.
pub fn file_name(index: usize) -> String {
    format!("result_{}.html", index)
}

/// Downloads result links one at a time into an output directory.
pub struct Archiver {
    fetcher: Arc<dyn PageFetcher>,
    output_dir: PathBuf,
}

impl Archiver {
    /// Creates an archiver writing into `output_dir`.
    pub fn new(fetcher: Arc<dyn PageFetcher>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            fetcher,
            output_dir: output_dir.into(),
        }
    }

    /// Returns the output directory.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Archives every link and returns one outcome per link, in order.
    pub async fn archive(&self, links: &[ResultLink]) -> Result<Vec<ArchiveOutcome>> {
        self.archive_with(links, |_| {}).await
    }

    /// Like [`archive`](Self::archive), calling `on_outcome` as soon as each
    /// link is done.
    ///
    /// Failing to create the output directory fails the whole batch. A link
    /// that cannot be downloaded or written only fails its own outcome.
    pub async fn archive_with<F>(
        &self,
        links: &[ResultLink],
        mut on_outcome: F,
    ) -> Result<Vec<ArchiveOutcome>>
    where
        F: FnMut(&ArchiveOutcome),
    {
        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| with_path(e, &self.output_dir))?;

        let mut outcomes = Vec::with_capacity(links.len());
        for (index, link) in links.iter().enumerate() {
            let outcome = self.archive_one(index, link).await;
            match &outcome {
                Ok(page) => debug!("Archived {} to {}", page.url, page.path.display()),
                Err(failure) => warn!("Failed to archive {}: {}", failure.url, failure.error),
            }
            on_outcome(&outcome);
            outcomes.push(outcome);
        }

        Ok(outcomes)
    }

    async fn archive_one(&self, index: usize, link: &ResultLink) -> ArchiveOutcome {
        let path = self.output_dir.join(file_name(index));
        match self.download_to(link, &path).await {
            Ok(()) => Ok(ArchivedPage {
                index,
                url: link.clone(),
                path,
            }),
            Err(error) => Err(ArchiveFailure {
                index,
                url: link.clone(),
                error,
            }),
        }
    }

    async fn download_to(&self, link: &ResultLink, path: &Path) -> Result<()> {
        let body = self.fetcher.fetch(link.url()).await?;
        tokio::fs::write(path, body)
            .await
            .map_err(|e| with_path(e, path))?;
        Ok(())
    }
}

fn with_path(error: io::Error, path: &Path) -> SearchError {
    SearchError::Io(io::Error::new(
        error.kind(),
        format!("{}: {}", path.display(), error),
    ))
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use url::Url;

    use super::*;

    /// Serves `<page>{url}</page>` for every URL except those listed as failing.
    struct FakeFetcher {
        failing: Vec<String>,
    }

    #[async_trait]
    impl PageFetcher for FakeFetcher {
        async fn fetch(&self, url: &Url) -> Result<String> {
            if self.failing.iter().any(|f| f == url.as_str()) {
                return Err(SearchError::Other(format!("Failed to download {}", url)));
            }
            Ok(format!("<page>{}</page>", url))
        }
    }

    fn fetcher(failing: &[&str]) -> Arc<dyn PageFetcher> {
        Arc::new(FakeFetcher {
            failing: failing.iter().map(|s| s.to_string()).collect(),
        })
    }

    fn links(urls: &[&str]) -> Vec<ResultLink> {
        urls.iter()
            .map(|u| ResultLink::new(Url::parse(u).unwrap()))
            .collect()
    }

    #[test]
    fn test_file_name() {
        assert_eq!(file_name(0), "result_0.html");
        assert_eq!(file_name(12), "result_12.html");
    }

    #[tokio::test]
    async fn test_archive_writes_numbered_files() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("html");
        let archiver = Archiver::new(fetcher(&[]), &out);

        let outcomes = archiver
            .archive(&links(&["http://a.com/", "http://b.com/"]))
            .await
            .unwrap();

        assert_eq!(outcomes.len(), 2);
        let first = outcomes[0].as_ref().unwrap();
        assert_eq!(first.index, 0);
        assert_eq!(first.path, out.join("result_0.html"));
        assert_eq!(
            std::fs::read_to_string(out.join("result_0.html")).unwrap(),
            "<page>http://a.com/</page>"
        );
        assert_eq!(
            std::fs::read_to_string(out.join("result_1.html")).unwrap(),
            "<page>http://b.com/</page>"
        );
    }

    #[tokio::test]
    async fn test_archive_tolerates_failed_fetch() {
        let dir = tempfile::tempdir().unwrap();
        let archiver = Archiver::new(fetcher(&["http://b.com/"]), dir.path());

        let mut reported = Vec::new();
        let outcomes = archiver
            .archive_with(
                &links(&["http://a.com/", "http://b.com/", "http://c.com/"]),
                |outcome| reported.push(outcome.is_ok()),
            )
            .await
            .unwrap();

        assert_eq!(reported, vec![true, false, true]);
        assert_eq!(outcomes.len(), 3);

        let failure = outcomes[1].as_ref().unwrap_err();
        assert_eq!(failure.index, 1);
        assert_eq!(failure.url.as_str(), "http://b.com/");
        assert!(failure.to_string().contains("http://b.com/"));

        assert!(dir.path().join("result_0.html").exists());
        assert!(!dir.path().join("result_1.html").exists());
        assert!(dir.path().join("result_2.html").exists());
        assert_eq!(outcomes[2].as_ref().unwrap().index, 2);
    }

    #[tokio::test]
    async fn test_archive_tolerates_failed_write() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("result_0.html")).unwrap();
        let archiver = Archiver::new(fetcher(&[]), dir.path());

        let outcomes = archiver
            .archive(&links(&["http://a.com/", "http://b.com/"]))
            .await
            .unwrap();

        let failure = outcomes[0].as_ref().unwrap_err();
        assert!(matches!(failure.error, SearchError::Io(_)));
        assert!(failure.to_string().contains("result_0.html"));
        assert!(outcomes[1].is_ok());
    }

    #[tokio::test]
    async fn test_archive_existing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let archiver = Archiver::new(fetcher(&[]), dir.path());
        assert_eq!(archiver.output_dir(), dir.path());

        archiver.archive(&links(&["http://a.com/"])).await.unwrap();
        let outcomes = archiver.archive(&links(&["http://b.com/"])).await.unwrap();

        assert!(outcomes[0].is_ok());
        assert_eq!(
            std::fs::read_to_string(dir.path().join("result_0.html")).unwrap(),
            "<page>http://b.com/</page>"
        );
    }

    #[tokio::test]
    async fn test_archive_empty_links_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested").join("html");
        let archiver = Archiver::new(fetcher(&[]), &out);

        let outcomes = archiver.archive(&[]).await.unwrap();
        assert!(outcomes.is_empty());
        assert!(out.is_dir());
    }

    #[tokio::test]
    async fn test_archive_directory_creation_failure() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("html");
        std::fs::write(&blocker, "not a directory").unwrap();
        let archiver = Archiver::new(fetcher(&[]), &blocker);

        let result = archiver.archive(&links(&["http://a.com/"])).await;
        assert!(matches!(result, Err(SearchError::Io(_))));
    }
}
