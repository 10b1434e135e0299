// GitHub API response types.
// Only the fields the stats pipeline consumes are deserialized.

use chrono::{DateTime, Utc};
use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};

/// Subset of `GET /users/{username}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawUser {
    /// Public repository count as reported by GitHub; may exceed the
    /// number of repositories fetched in one page.
    pub public_repos: u64,
}

/// One element of `GET /users/{username}/repos`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRepo {
    pub name: String,
    pub language: Option<String>,
    /// `null` for repositories that were never pushed to.
    pub pushed_at: Option<DateTime<Utc>>,
}

/// Rate limit information from response headers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RateLimit {
    pub limit: u64,
    pub remaining: u64,
    pub reset: u64,
}

impl RateLimit {
    /// Read `x-ratelimit-*` headers. Returns `None` when GitHub sent none.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let read = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
        };

        let remaining = read("x-ratelimit-remaining")?;
        Some(Self {
            limit: read("x-ratelimit-limit").unwrap_or_default(),
            remaining,
            reset: read("x-ratelimit-reset").unwrap_or_default(),
        })
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }

    /// Reset time formatted as `HH:MM:SS` UTC.
    pub fn reset_at(&self) -> String {
        DateTime::from_timestamp(self.reset as i64, 0)
            .map(|dt| dt.format("%H:%M:%S").to_string())
            .unwrap_or_else(|| "unknown".to_string())
    }
}
