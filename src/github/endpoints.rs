// GitHub API endpoint functions.
// The two reads the widget needs, behind a trait so the orchestrator can run against fakes.

use std::future::Future;

use crate::error::Result;

use super::client::GitHubClient;
use super::types::{RawRepo, RawUser};

/// Read-only view of the GitHub API used by the widget.
pub trait GitHubApi {
    /// `GET /users/{username}`.
    fn get_user(&self, username: &str) -> impl Future<Output = Result<RawUser>>;

    /// First page of `GET /users/{username}/repos`, most recently pushed first.
    fn get_repos(&self, username: &str, page_size: u32)
    -> impl Future<Output = Result<Vec<RawRepo>>>;
}

impl GitHubApi for GitHubClient {
    async fn get_user(&self, username: &str) -> Result<RawUser> {
        self.get_json(&format!("/users/{}", username), &[]).await
    }

    async fn get_repos(&self, username: &str, page_size: u32) -> Result<Vec<RawRepo>> {
        let params = [
            ("per_page", page_size.to_string()),
            ("sort", "pushed".to_string()),
        ];
        self.get_json(&format!("/users/{}/repos", username), &params)
            .await
    }
}
