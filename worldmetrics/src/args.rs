//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

use worldmetrics_common::{AppConfig, Result, default_config_path, load_config};

/// Command-line arguments for the dashboard.
#[derive(Parser, Debug, Clone, Default)]
#[command(about = "WorldMetrics - country indicator dashboard")]
pub struct Args {
    /// Path to configuration file (defaults to the per-user config file, if present).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the backend root URL.
    #[arg(long)]
    pub backend_url: Option<String>,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Args {
    /// Resolve the effective configuration.
    ///
    /// An explicit `--config` must load. The default location is optional and
    /// built-in defaults apply when it does not exist. Command-line overrides
    /// are applied last.
    pub fn resolve_config(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => match default_config_path().filter(|path| path.exists()) {
                Some(path) => load_config(path)?,
                None => AppConfig::default(),
            },
        };

        if let Some(url) = &self.backend_url {
            config.backend.base_url = url.clone();
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }

        Ok(config)
    }
}
