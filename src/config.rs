//! Dashboard Configuration Module
//! Optional JSON settings file with defaults for every field.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// File looked up in the working directory at startup.
pub const CONFIG_FILE_NAME: &str = "channel_insight.json";

/// Runtime settings. Every field falls back to its default when omitted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// CSV with the channel statistics.
    pub data_path: PathBuf,
    /// Maximum number of categories offered by the explorer filter.
    pub category_limit: usize,
    /// Rows shown in the ranking chart.
    pub top_n: usize,
    /// Suggested file name for the filtered CSV download.
    pub export_file_name: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("most_subscribed_youtube_channels.csv"),
            category_limit: 10,
            top_n: 10,
            export_file_name: "filtered_data.csv".to_string(),
        }
    }
}

impl DashboardConfig {
    /// Load settings from `path`, or the defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        config.validate()?;

        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.category_limit == 0 {
            bail!("category_limit must be at least 1");
        }
        if self.top_n == 0 {
            bail!("top_n must be at least 1");
        }
        if self.export_file_name.trim().is_empty() {
            bail!("export_file_name must not be empty");
        }
        Ok(())
    }
}
