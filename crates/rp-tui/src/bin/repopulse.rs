// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! RepoPulse dashboard entry point.
//!
//! Wires the settings file, CLI flags and the chosen API client into
//! the dashboard loop. Without a server URL (or with `--demo`) the
//! dashboard runs against a deterministic fixture dataset.

use anyhow::anyhow;
use clap::Parser;
use std::sync::Arc;

use rp_client_api::AnalyticsApi;
use rp_core::QueryCache;
use rp_logging::CliLoggingArgs;
use rp_rest_client::{AuthConfig, RestClient};
use rp_rest_mock_client::{FixtureDataset, MockAnalyticsClient};
use rp_tui::run_dashboard;
use rp_tui::settings::{preset_from_label, Settings};
use rp_tui::view::TuiDependencies;

#[derive(Parser)]
#[command(
    name = "repopulse",
    version,
    about = "Terminal dashboard for repository analytics"
)]
struct Cli {
    /// URL of the analytics REST service
    #[arg(long, help = "URL of the analytics REST service")]
    server_url: Option<String>,

    /// Bearer token for authenticating with the server
    #[arg(long, help = "Bearer token for authenticating with the server")]
    auth_token: Option<String>,

    /// Initial date-range preset
    #[arg(long, help = "Initial date-range preset (7d, 30d, 90d, 1y)")]
    range: Option<String>,

    /// Run against a built-in fixture dataset instead of a server
    #[arg(long, help = "Run against a built-in fixture dataset instead of a server")]
    demo: bool,

    #[command(flatten)]
    logging: CliLoggingArgs,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load_default()?;

    // The dashboard owns the terminal, so logs always go to a file.
    cli.logging.merged_with(&settings.logging).init("repopulse", true)?;

    let server_url = cli.server_url.or_else(|| settings.server_url.clone());
    let auth_token = cli.auth_token.or_else(|| settings.auth_token.clone());
    let initial_preset = cli
        .range
        .as_deref()
        .and_then(preset_from_label)
        .unwrap_or_else(|| settings.initial_preset());

    let client: Arc<dyn AnalyticsApi> = match (&server_url, cli.demo) {
        (Some(url), false) => {
            let auth = match auth_token {
                Some(token) => AuthConfig::bearer(token),
                None => AuthConfig::none(),
            };
            Arc::new(RestClient::from_url(url, auth)?)
        }
        _ => {
            let dataset = FixtureDataset::anchored(rp_core::today_local());
            let mut mock = MockAnalyticsClient::with_dataset(dataset);
            mock.set_delay(120);
            Arc::new(mock)
        }
    };

    tracing::info!(client = client.description(), "starting dashboard");

    let deps = TuiDependencies {
        client,
        cache: QueryCache::with_default_staleness(),
        initial_preset,
    };

    run_dashboard(deps).await.map_err(|e| anyhow!("dashboard error: {}", e))
}
