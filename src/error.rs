// Error types for github-live.
// Covers session storage failures, GitHub API failures, and configuration errors.

use thiserror::Error;

/// Failure raised by the ambient session storage.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("session storage unavailable: {0}")]
    Unavailable(String),

    #[error("session storage quota exceeded: {needed} bytes needed, limit is {limit}")]
    QuotaExceeded { needed: usize, limit: usize },
}

#[derive(Error, Debug)]
pub enum LiveError {
    #[error("Cache unavailable: {0}")]
    CacheUnavailable(#[from] StorageError),

    #[error("Cache entry corrupt: {0}")]
    CacheCorrupt(#[source] serde_json::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("GitHub API returned HTTP {status} for {url}")]
    Response { status: u16, url: String },

    #[error("Malformed response body from {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// User-visible failure class. All network and parse errors collapse into
/// one of these; none of them distinguish themselves on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Network,
    Response,
    Parse,
}

impl LiveError {
    /// Failure class for the orchestrator's tagged result.
    ///
    /// Cache and configuration errors never reach the fetch path, but map to
    /// `Network` so the function stays total.
    pub fn kind(&self) -> FailureKind {
        match self {
            LiveError::Response { .. } => FailureKind::Response,
            LiveError::Parse { .. } => FailureKind::Parse,
            LiveError::Network(_)
            | LiveError::CacheUnavailable(_)
            | LiveError::CacheCorrupt(_)
            | LiveError::Config(_) => FailureKind::Network,
        }
    }
}

pub type Result<T> = std::result::Result<T, LiveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_collapses_fetch_errors() {
        let response = LiveError::Response {
            status: 503,
            url: "https://api.github.com/users/x".to_string(),
        };
        assert_eq!(response.kind(), FailureKind::Response);

        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let parse = LiveError::Parse {
            url: "https://api.github.com/users/x".to_string(),
            source,
        };
        assert_eq!(parse.kind(), FailureKind::Parse);
    }

    #[test]
    fn test_storage_error_message() {
        let err = StorageError::QuotaExceeded {
            needed: 10,
            limit: 4,
        };
        assert_eq!(
            err.to_string(),
            "session storage quota exceeded: 10 bytes needed, limit is 4"
        );
    }
}
