// GitHub API HTTP client.
// Issues anonymous GET requests, checks status, and decodes JSON bodies.

use reqwest::{
    Client, Response, StatusCode,
    header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT},
};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{LiveError, Result};

use super::types::RateLimit;

const GITHUB_API_VERSION: &str = "2022-11-28";

/// Unauthenticated GitHub REST client.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    api_base: String,
}

impl GitHubClient {
    /// Create a client against `api_base` (e.g. `https://api.github.com`).
    pub fn new(api_base: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();

        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static(GITHUB_API_VERSION),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static("github-live"));

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(LiveError::Network)?;

        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.api_base)
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// GET `endpoint` with query parameters and decode the JSON body.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<T> {
        let url = format!("{}{}", self.api_base, endpoint);
        let response = self.client.get(&url).query(params).send().await?;

        log_rate_limit(&response);
        let response = check_response(response)?;

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|source| LiveError::Parse { url, source })
    }
}

/// Debug-log rate limit headers, warn when exhausted.
fn log_rate_limit(response: &Response) {
    let Some(limit) = RateLimit::from_headers(response.headers()) else {
        return;
    };

    if limit.is_exhausted() {
        warn!(
            limit = limit.limit,
            reset_at = %limit.reset_at(),
            "GitHub rate limit exhausted"
        );
    } else {
        debug!(
            limit = limit.limit,
            remaining = limit.remaining,
            "GitHub rate limit"
        );
    }
}

/// Any non-2xx status is a response error.
fn check_response(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().to_string();
    if status == StatusCode::FORBIDDEN || status == StatusCode::TOO_MANY_REQUESTS {
        warn!(%url, status = status.as_u16(), "GitHub refused request, likely rate limited");
    } else {
        warn!(%url, status = status.as_u16(), "GitHub request failed");
    }

    Err(LiveError::Response {
        status: status.as_u16(),
        url,
    })
}
