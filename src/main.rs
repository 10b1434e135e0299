// github-live binary.
// Runs the widget once against the portfolio page and prints the rendered markup.

use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use github_live::cache::MemoryStorage;
use github_live::clock::SystemClock;
use github_live::github::GitHubClient;
use github_live::render::Page;
use github_live::{Config, Widget, WidgetState};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let client = match GitHubClient::from_config(&config) {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "failed to build HTTP client");
            return ExitCode::FAILURE;
        }
    };

    info!(user = %config.username, api = %client.api_base(), "starting github-live");

    let mut page = Page::portfolio();
    let mut widget = Widget::new(client, MemoryStorage::new(), SystemClock, config);

    // Widget failures are contained to the widget: the page still renders.
    match widget.activate(&mut page).await {
        WidgetState::Success(record) => info!(
            public_repos = record.public_repo_count,
            active = record.active_repo_count,
            languages = record.distinct_language_count,
            "widget ready"
        ),
        WidgetState::Error(kind) => info!(?kind, "widget showing error state"),
        WidgetState::Idle | WidgetState::Loading => {}
    }

    print!("{}", page.to_html());
    ExitCode::SUCCESS
}
