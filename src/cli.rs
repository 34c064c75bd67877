//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{ConfigError, MapConfig};

/// Builds an interactive map of onshore wind planning applications.
#[derive(Debug, Parser)]
#[command(name = "wind-planning-map", version, about)]
pub struct Cli {
    /// TOML configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Planning database CSV (overrides source.path)
    #[arg(long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Directory of overlay layers (overrides overlays.dir)
    #[arg(long, value_name = "DIR")]
    pub overlays: Option<PathBuf>,

    /// Output HTML page (overrides output.html)
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Also write the cleaned records as CSV (overrides output.records_csv)
    #[arg(long, value_name = "PATH")]
    pub records_out: Option<PathBuf>,

    /// Set the logging level
    #[arg(long, default_value = "info")]
    pub log_level: tracing::Level,
}

impl Cli {
    /// Loads the configuration file, if any, and applies command-line
    /// overrides on top.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or parsed.
    pub fn resolve_config(&self) -> Result<MapConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => MapConfig::from_toml_file(path)?,
            None => MapConfig::default(),
        };
        self.apply_overrides(&mut config);
        Ok(config)
    }

    fn apply_overrides(&self, config: &mut MapConfig) {
        if let Some(input) = &self.input {
            config.source.path.clone_from(input);
        }
        if let Some(dir) = &self.overlays {
            config.overlays.dir.clone_from(dir);
        }
        if let Some(output) = &self.output {
            config.output.html.clone_from(output);
        }
        if let Some(records) = &self.records_out {
            config.output.records_csv = Some(records.clone());
        }
    }
}
