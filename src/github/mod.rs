// GitHub API module.
// Anonymous REST client plus the response types the stats pipeline consumes.

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::GitHubClient;
pub use endpoints::GitHubApi;
pub use types::{RateLimit, RawRepo, RawUser};

#[cfg(test)]
pub(crate) mod testing;
