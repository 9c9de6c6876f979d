//! Error types for the search library.

use thiserror::Error;

/// Result type alias for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors that can occur while searching, extracting or archiving.
#[derive(Error, Debug)]
pub enum SearchError {
    /// The query had no terms.
    #[error("{0}")]
    Usage(String),

    /// Downloading a URL failed.
    #[error("Failed to download {url}: {source}")]
    Download {
        /// The URL that was requested.
        url: String,
        /// Underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("Failed to download {url}: HTTP {status}")]
    Status {
        /// The URL that was requested.
        url: String,
        /// Status of the final response.
        status: reqwest::StatusCode,
    },

    /// A result link candidate could not be turned into a URL.
    #[error("Failed to parse result links: {0}")]
    Parse(String),

    /// The query endpoint does not form a valid URL.
    #[error("Invalid query endpoint: {0}")]
    InvalidEndpoint(String),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// URL parsing error.
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Filesystem error while archiving.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error.
    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_usage() {
        let err = SearchError::Usage("usage: serp-archive query ...".to_string());
        assert_eq!(err.to_string(), "usage: serp-archive query ...");
    }

    #[test]
    fn test_error_display_status() {
        let err = SearchError::Status {
            url: "http://example.com/".to_string(),
            status: reqwest::StatusCode::FORBIDDEN,
        };
        assert_eq!(
            err.to_string(),
            "Failed to download http://example.com/: HTTP 403 Forbidden"
        );
    }

    #[test]
    fn test_error_display_parse() {
        let err = SearchError::Parse("httpnotaurl".to_string());
        assert_eq!(err.to_string(), "Failed to parse result links: httpnotaurl");
    }

    #[test]
    fn test_error_display_invalid_endpoint() {
        let err = SearchError::InvalidEndpoint("empty host".to_string());
        assert_eq!(err.to_string(), "Invalid query endpoint: empty host");
    }

    #[test]
    fn test_error_display_config() {
        let err = SearchError::Config("heading marker must not be empty".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: heading marker must not be empty"
        );
    }

    #[test]
    fn test_error_from_url_parse() {
        let err: SearchError = url::Url::parse("not a url").unwrap_err().into();
        assert!(matches!(err, SearchError::UrlParse(_)));
        assert!(err.to_string().starts_with("URL parsing error"));
    }

    #[test]
    fn test_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: SearchError = io.into();
        assert_eq!(err.to_string(), "I/O error: denied");
    }

    #[test]
    fn test_error_display_other() {
        let err = SearchError::Other("something went wrong".to_string());
        assert_eq!(err.to_string(), "something went wrong");
    }
}
