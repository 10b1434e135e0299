// Widget configuration.
// Holds the GitHub username, API endpoint, cache TTL, and the static repo-to-card table.

use std::time::Duration;

use crate::error::{LiveError, Result};
use crate::time::Phrasing;

/// Session storage key holding the cache envelope.
pub const CACHE_KEY: &str = "gh_live_cache";

/// Default TTL for cached stats: 15 minutes keeps an anonymous client well
/// under GitHub's 60 requests/hour limit.
pub const DEFAULT_TTL: Duration = Duration::from_secs(15 * 60);

/// GitHub caps `per_page` at 100.
pub const MAX_PAGE_SIZE: u32 = 100;

pub const DEFAULT_USERNAME: &str = "SinProp";
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// GitHub repository name -> project card heading id.
pub const REPO_DISPLAY_MAP: &[(&str, &str)] = &[
    ("Manifest", "proj-manifest-title"),
    ("Value-Chain-Manifest", "proj-valuechain-title"),
    ("island-estimator", "proj-estimator-title"),
    ("Island-Platform", "proj-platform-title"),
    ("Production-Scheduling", "proj-current-title"),
    ("SwiftSail", "proj-swiftsail-title"),
    ("ValorTrack", "proj-valortrac-title"),
    ("govpulsepro", "proj-govpulse-title"),
    ("TimeTrackerApp", "proj-islandtime-title"),
];

/// Runtime configuration for one widget instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// GitHub login whose public repositories are summarized.
    pub username: String,
    /// API base URL, without trailing slash.
    pub api_base: String,
    /// Repositories requested in the single page fetched.
    pub page_size: u32,
    /// How long a cached envelope stays valid.
    pub cache_ttl: Duration,
    /// Phrasing of the "Updated ..." badges.
    pub phrasing: Phrasing,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            username: DEFAULT_USERNAME.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            page_size: MAX_PAGE_SIZE,
            cache_ttl: DEFAULT_TTL,
            phrasing: Phrasing::Natural,
        }
    }
}

impl Config {
    /// Build a config from `GITHUB_LIVE_*` environment variables, falling
    /// back to defaults for anything unset.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Config::from_env`] but reads through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(user) = lookup("GITHUB_LIVE_USER") {
            let user = user.trim();
            if user.is_empty() {
                return Err(LiveError::Config("GITHUB_LIVE_USER is empty".to_string()));
            }
            config.username = user.to_string();
        }

        if let Some(base) = lookup("GITHUB_LIVE_API_BASE") {
            config.api_base = base.trim_end_matches('/').to_string();
        }

        if let Some(size) = lookup("GITHUB_LIVE_PAGE_SIZE") {
            let size: u32 = size.parse().map_err(|_| {
                LiveError::Config(format!("GITHUB_LIVE_PAGE_SIZE is not a number: {size}"))
            })?;
            if size == 0 || size > MAX_PAGE_SIZE {
                return Err(LiveError::Config(format!(
                    "GITHUB_LIVE_PAGE_SIZE must be between 1 and {MAX_PAGE_SIZE}, got {size}"
                )));
            }
            config.page_size = size;
        }

        if let Some(ttl) = lookup("GITHUB_LIVE_CACHE_TTL_SECS") {
            let secs: u64 = ttl.parse().map_err(|_| {
                LiveError::Config(format!("GITHUB_LIVE_CACHE_TTL_SECS is not a number: {ttl}"))
            })?;
            config.cache_ttl = Duration::from_secs(secs);
        }

        if let Some(phrasing) = lookup("GITHUB_LIVE_PHRASING") {
            config.phrasing = match phrasing.to_ascii_lowercase().as_str() {
                "compact" => Phrasing::Compact,
                "natural" => Phrasing::Natural,
                other => {
                    return Err(LiveError::Config(format!(
                        "GITHUB_LIVE_PHRASING must be `compact` or `natural`, got `{other}`"
                    )));
                }
            };
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_env_empty() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.page_size, 100);
        assert_eq!(config.cache_ttl, Duration::from_secs(900));
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("GITHUB_LIVE_USER", "octocat"),
            ("GITHUB_LIVE_API_BASE", "http://127.0.0.1:8080/"),
            ("GITHUB_LIVE_PAGE_SIZE", "30"),
            ("GITHUB_LIVE_CACHE_TTL_SECS", "60"),
            ("GITHUB_LIVE_PHRASING", "Compact"),
        ]))
        .unwrap();

        assert_eq!(config.username, "octocat");
        assert_eq!(config.api_base, "http://127.0.0.1:8080");
        assert_eq!(config.page_size, 30);
        assert_eq!(config.cache_ttl, Duration::from_secs(60));
        assert_eq!(config.phrasing, Phrasing::Compact);
    }

    #[test]
    fn test_rejects_bad_values() {
        for pairs in [
            [("GITHUB_LIVE_PAGE_SIZE", "0")],
            [("GITHUB_LIVE_PAGE_SIZE", "101")],
            [("GITHUB_LIVE_PAGE_SIZE", "lots")],
            [("GITHUB_LIVE_CACHE_TTL_SECS", "-1")],
            [("GITHUB_LIVE_PHRASING", "verbose")],
            [("GITHUB_LIVE_USER", "  ")],
        ] {
            let result = Config::from_lookup(lookup_from(&pairs));
            assert!(matches!(result, Err(LiveError::Config(_))), "{pairs:?}");
        }
    }

    #[test]
    fn test_repo_map_heading_ids_unique() {
        let mut ids: Vec<&str> = REPO_DISPLAY_MAP.iter().map(|(_, id)| *id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), REPO_DISPLAY_MAP.len());
    }
}
