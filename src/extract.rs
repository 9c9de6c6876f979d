//! Marker-based result link extraction.
//!
//! Result pages are not parsed as HTML. Each result is located by three
//! literal markers: a heading that opens the result block, the protocol
//! text where the link starts, and the tail the engine appends right after
//! the link. The scan breaks if the engine changes its markup, so the
//! markers live in [`Markers`] and can be replaced without touching the scan.

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::{Result, ResultLink, SearchError};

/// The literal strings that delimit result links in a results page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Markers {
    /// Opens a search result block.
    pub heading: String,
    /// Where a link starts. Part of the link itself.
    pub protocol: String,
    /// Appended by the engine right after each result link.
    pub end: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            heading: "<h3 class=\"r\">".to_string(),
            protocol: "http".to_string(),
            end: "&amp;sa=U".to_string(),
        }
    }
}

impl Markers {
    /// Checks that no marker is empty.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("heading", &self.heading),
            ("protocol", &self.protocol),
            ("end", &self.end),
        ] {
            if value.is_empty() {
                return Err(SearchError::Config(format!(
                    "{} marker must not be empty",
                    name
                )));
            }
        }
        Ok(())
    }
}

/// Scans results pages for links using a set of [`Markers`].
#[derive(Debug, Clone, Default)]
pub struct LinkExtractor {
    markers: Markers,
}

impl LinkExtractor {
    /// Creates an extractor using the default markers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an extractor using custom markers.
    pub fn with_markers(markers: Markers) -> Result<Self> {
        markers.validate()?;
        Ok(Self { markers })
    }

    /// Returns the markers in use.
    pub fn markers(&self) -> &Markers {
        &self.markers
    }

    /// Extracts result links in the order they appear in `html`.
    ///
    /// A heading without a following protocol/end pair ends the scan. A
    /// candidate that is found but cannot be decoded or parsed as a URL
    /// fails the whole extraction.
    pub fn extract(&self, html: &str) -> Result<Vec<ResultLink>> {
        let markers = &self.markers;
        let mut links = Vec::new();
        let mut pos = 0;

        while let Some(heading) = find_from(html, &markers.heading, pos) {
            let Some(start) = find_from(html, &markers.protocol, heading) else {
                break;
            };
            let Some(end) = find_from(html, &markers.end, start) else {
                break;
            };

            if start < end {
                links.push(parse_candidate(&html[start..end])?);
            }

            pos = end + markers.end.len();
        }

        debug!("Extracted {} result links", links.len());
        Ok(links)
    }
}

fn find_from(haystack: &str, needle: &str, from: usize) -> Option<usize> {
    haystack
        .get(from..)?
        .find(needle)
        .map(|offset| from + offset)
}

/// Result hrefs are form-encoded: `+` is a space and `%2B` a literal plus.
fn parse_candidate(candidate: &str) -> Result<ResultLink> {
    let spaced = candidate.replace('+', " ");
    let decoded = urlencoding::decode(&spaced)
        .map_err(|e| SearchError::Parse(format!("cannot decode {:?}: {}", candidate, e)))?;
    let url = Url::parse(&decoded)
        .map_err(|e| SearchError::Parse(format!("{:?} is not a valid URL: {}", decoded, e)))?;
    Ok(ResultLink::new(url))
}
