// github-live: live GitHub repository metrics for a portfolio page.
// Fetches profile and repository data, derives summary stats, caches them
// for a bounded window, and renders them into the page.

pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod github;
pub mod render;
pub mod stats;
pub mod time;
pub mod widget;

pub use config::Config;
pub use error::{FailureKind, LiveError, Result};
pub use stats::StatsRecord;
pub use widget::{FetchOutcome, Widget, WidgetState};
