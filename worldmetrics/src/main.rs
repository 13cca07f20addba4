//! WorldMetrics - country indicator dashboard.
//!
//! Loads the country/metric catalog from the data backend, lets the user pick
//! up to five countries and two metrics, and charts the resulting time series.

use anyhow::{Context, Result};
use clap::Parser;
use iced::application;

use worldmetrics::WorldMetrics;
use worldmetrics::args::Args;
use worldmetrics_common::{BackendClient, init_tracing};

fn main() -> Result<()> {
    let args = Args::parse();

    let config = args.resolve_config()?;

    init_tracing(&config.logging)?;

    let client = BackendClient::new(&config.backend.base_url)
        .context("Failed to create backend client")?;
    let download_dir = config.resolved_download_dir();

    tracing::info!(
        backend = %config.backend.base_url,
        download_dir = %download_dir.display(),
        "Starting WorldMetrics"
    );

    application(
        move || WorldMetrics::new(client.clone(), download_dir.clone()),
        WorldMetrics::update,
        WorldMetrics::view,
    )
    .title(WorldMetrics::title)
    .theme(WorldMetrics::theme)
    .run()
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
