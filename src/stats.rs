// Stats transformer.
// Derives the summary record from the raw user and repository payloads.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::github::{RawRepo, RawUser};

/// A repository pushed within this many days counts as active.
pub const ACTIVE_WINDOW_DAYS: i64 = 30;

/// A repository pushed within this many days gets the "fresh" highlight.
pub const FRESH_WINDOW_DAYS: i64 = 7;

/// Summary statistics, as cached and rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsRecord {
    pub captured_at: DateTime<Utc>,
    /// Reported by the profile endpoint. Not reconciled with `repos.len()`:
    /// only one page of repositories is fetched.
    pub public_repo_count: u64,
    pub active_repo_count: usize,
    pub distinct_language_count: usize,
    /// Repositories in the order received (most recently pushed first).
    pub repos: Vec<RawRepo>,
}

impl StatsRecord {
    /// Look up a fetched repository by exact name.
    pub fn repo(&self, name: &str) -> Option<&RawRepo> {
        self.repos.iter().find(|r| r.name == name)
    }
}

/// Build a [`StatsRecord`] as of `now`.
pub fn transform(user: &RawUser, repos: Vec<RawRepo>, now: DateTime<Utc>) -> StatsRecord {
    let active_repo_count = repos.iter().filter(|r| is_active(r, now)).count();

    let distinct_language_count = repos
        .iter()
        .filter_map(|r| r.language.as_deref())
        .collect::<HashSet<_>>()
        .len();

    StatsRecord {
        captured_at: now,
        public_repo_count: user.public_repos,
        active_repo_count,
        distinct_language_count,
        repos,
    }
}

/// Pushed strictly later than `now - 30 days`. Never-pushed repos are inactive.
pub fn is_active(repo: &RawRepo, now: DateTime<Utc>) -> bool {
    repo.pushed_at
        .is_some_and(|pushed| pushed > now - Duration::days(ACTIVE_WINDOW_DAYS))
}

/// Pushed no more than 7 days before `now`.
pub fn is_fresh(pushed_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now.signed_duration_since(pushed_at) <= Duration::days(FRESH_WINDOW_DAYS)
}
