// Render adapter.
// Writes a stats record into a page; missing targets are skipped, never errors.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::stats::{StatsRecord, is_fresh};
use crate::time::{Phrasing, relative_time_with};

use super::page::{MetricKey, Page};

pub const VISIBLE_CLASS: &str = "visible";
pub const FRESH_CLASS: &str = "fresh";

/// Renders records into a [`Page`] using a repo name -> heading id table.
#[derive(Debug, Clone, Copy)]
pub struct RenderAdapter<'a> {
    mapping: &'a [(&'a str, &'a str)],
    phrasing: Phrasing,
}

impl<'a> RenderAdapter<'a> {
    pub fn new(mapping: &'a [(&'a str, &'a str)], phrasing: Phrasing) -> Self {
        Self { mapping, phrasing }
    }

    /// Metrics and cards in one pass.
    pub fn render(&self, page: &mut Page, record: &StatsRecord, now: DateTime<Utc>) {
        let metrics = self.render_metrics(page, record);
        let cards = self.render_cards(page, record, now);
        debug!(metrics, cards, "rendered stats");
    }

    /// Write the three counters. Returns how many slots were present.
    pub fn render_metrics(&self, page: &mut Page, record: &StatsRecord) -> usize {
        let mut written = 0;
        for key in MetricKey::ALL {
            let value = match key {
                MetricKey::PublicRepos => record.public_repo_count.to_string(),
                MetricKey::ActiveRepos => record.active_repo_count.to_string(),
                MetricKey::Languages => record.distinct_language_count.to_string(),
            };
            if let Some(el) = page.metric_mut(key.attr()) {
                el.text = value;
                written += 1;
            }
        }
        written
    }

    /// Update the badge of every mapped card whose repo was fetched.
    /// Returns how many badges were updated.
    pub fn render_cards(
        &self,
        page: &mut Page,
        record: &StatsRecord,
        now: DateTime<Utc>,
    ) -> usize {
        let mut updated = 0;
        for (repo_name, heading_id) in self.mapping {
            let Some(pushed_at) = record.repo(repo_name).and_then(|r| r.pushed_at) else {
                continue;
            };
            let Some(badge) = page.badge_mut(heading_id) else {
                continue;
            };

            badge.text = format!(
                "Updated {}",
                relative_time_with(pushed_at, now, self.phrasing)
            );
            badge.add_class(VISIBLE_CLASS);
            if is_fresh(pushed_at, now) {
                badge.add_class(FRESH_CLASS);
            }
            updated += 1;
        }
        updated
    }

    pub fn set_loading(&self, page: &mut Page, loading: bool) {
        if let Some(el) = page.loading_indicator_mut() {
            el.hidden = !loading;
        }
    }

    pub fn show_error(&self, page: &mut Page) {
        if let Some(el) = page.error_indicator_mut() {
            el.hidden = false;
        }
    }
}
