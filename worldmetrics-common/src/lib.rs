//! WorldMetrics Common Library
//!
//! Shared types and utilities for the WorldMetrics dashboard:
//!
//! - [`model`] - Wire data model (`Metadata`, `CountryRef`, `ChartResult`, `Series`)
//! - [`query`] - `/data` and `/download` query builders
//! - [`client`] - HTTP client for the data backend
//! - [`config`] - Configuration loading (JSON5 format)
//! - [`error`] - Error types

pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod query;

// Re-export commonly used types at the crate root
pub use client::BackendClient;
pub use config::{
    AppConfig, BackendConfig, LogFormat, LoggingConfig, default_config_path, load_config,
    parse_config,
};
pub use error::{Error, Result};
pub use model::{ChartResult, CountryRef, Metadata, MetricSeries, Series, YearBounds};
pub use query::{DataQuery, DownloadQuery};

/// Initialize tracing with the given configuration.
///
/// Supports two output formats:
/// - `LogFormat::Text` (default): Human-readable text format
/// - `LogFormat::Json`: Structured JSON format for log aggregation systems
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format {
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(fmt::layer())
                .with(filter)
                .try_init()
                .map_err(|e| Error::Config(format!("Failed to initialize tracing: {}", e)))?;
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(fmt::layer().json())
                .with(filter)
                .try_init()
                .map_err(|e| Error::Config(format!("Failed to initialize tracing: {}", e)))?;
        }
    }

    Ok(())
}
