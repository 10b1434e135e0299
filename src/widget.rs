// Fetch orchestrator.
// Drives one activation: cache lookup, concurrent GitHub fetch, transform, cache write, render.

use tracing::{debug, info, warn};

use crate::cache::{CacheStore, SessionStorage};
use crate::clock::Clock;
use crate::config::{Config, REPO_DISPLAY_MAP};
use crate::error::{FailureKind, Result};
use crate::github::GitHubApi;
use crate::render::{Page, RenderAdapter};
use crate::stats::{self, StatsRecord};

/// Widget lifecycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum WidgetState {
    #[default]
    Idle,
    Loading,
    Success(StatsRecord),
    Error(FailureKind),
}

impl WidgetState {
    pub fn is_loading(&self) -> bool {
        matches!(self, WidgetState::Loading)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, WidgetState::Error(_))
    }

    pub fn record(&self) -> Option<&StatsRecord> {
        match self {
            WidgetState::Success(record) => Some(record),
            _ => None,
        }
    }
}

/// Result of one network refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Success(StatsRecord),
    Failure(FailureKind),
}

/// Fetch the profile and first repo page concurrently and transform them.
/// Fails if either request fails.
pub async fn fetch_stats<A, C>(
    api: &A,
    clock: &C,
    username: &str,
    page_size: u32,
) -> Result<StatsRecord>
where
    A: GitHubApi,
    C: Clock,
{
    let (user, repos) = tokio::join!(
        api.get_user(username),
        api.get_repos(username, page_size)
    );
    let user = user?;
    let repos = repos?;

    Ok(stats::transform(&user, repos, clock.now()))
}

/// Live GitHub metrics widget bound to one page lifecycle.
pub struct Widget<A, S, C> {
    api: A,
    cache: CacheStore<S, C>,
    config: Config,
    mapping: &'static [(&'static str, &'static str)],
    state: WidgetState,
}

impl<A, S, C> Widget<A, S, C>
where
    A: GitHubApi,
    S: SessionStorage,
    C: Clock,
{
    pub fn new(api: A, storage: S, clock: C, config: Config) -> Self {
        let cache = CacheStore::new(storage, clock).with_ttl(config.cache_ttl);
        Self {
            api,
            cache,
            config,
            mapping: REPO_DISPLAY_MAP,
            state: WidgetState::Idle,
        }
    }

    /// Replace the repo name -> card heading table.
    pub fn with_mapping(mut self, mapping: &'static [(&'static str, &'static str)]) -> Self {
        self.mapping = mapping;
        self
    }

    pub fn state(&self) -> &WidgetState {
        &self.state
    }

    pub fn cache(&self) -> &CacheStore<S, C> {
        &self.cache
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the widget once against `page`.
    ///
    /// A cached record renders immediately without touching the loading
    /// indicator. Otherwise the loading indicator is shown while GitHub is
    /// queried, and hidden again on both success and failure; failure also
    /// reveals the error indicator. Calling this again after the first run
    /// returns the settled state without doing any work.
    pub async fn activate(&mut self, page: &mut Page) -> &WidgetState {
        if self.state != WidgetState::Idle {
            debug!("widget already activated");
            return &self.state;
        }

        let renderer = RenderAdapter::new(self.mapping, self.config.phrasing);

        if let Some(record) = self.cache.read() {
            info!(
                user = %self.config.username,
                captured_at = %record.captured_at,
                "rendering cached GitHub stats"
            );
            renderer.set_loading(page, false);
            renderer.render(page, &record, self.cache.clock().now());
            self.state = WidgetState::Success(record);
            return &self.state;
        }

        self.state = WidgetState::Loading;
        renderer.set_loading(page, true);

        match self.refresh().await {
            FetchOutcome::Success(record) => {
                self.cache.write(&record);
                renderer.set_loading(page, false);
                renderer.render(page, &record, self.cache.clock().now());
                self.state = WidgetState::Success(record);
            }
            FetchOutcome::Failure(kind) => {
                renderer.set_loading(page, false);
                renderer.show_error(page);
                self.state = WidgetState::Error(kind);
            }
        }

        &self.state
    }

    /// Query GitHub once. Never retries.
    pub async fn refresh(&self) -> FetchOutcome {
        let result = fetch_stats(
            &self.api,
            self.cache.clock(),
            &self.config.username,
            self.config.page_size,
        )
        .await;

        match result {
            Ok(record) => {
                info!(
                    user = %self.config.username,
                    public_repos = record.public_repo_count,
                    fetched = record.repos.len(),
                    active = record.active_repo_count,
                    languages = record.distinct_language_count,
                    "fetched GitHub stats"
                );
                FetchOutcome::Success(record)
            }
            Err(e) => {
                warn!(user = %self.config.username, error = %e, "failed to fetch GitHub stats");
                FetchOutcome::Failure(e.kind())
            }
        }
    }
}
