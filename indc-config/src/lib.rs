//! Layered configuration for the indc tools.
//!
//! Settings are read from `<dir>/default.toml`, then `<dir>/<env>.toml`, then
//! `INDC__`-prefixed environment variables, later layers overriding earlier
//! ones. Indicator definitions use the same tagged record format as the
//! codec, so they are normalized and validated while loading.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use config::{Config, Environment, File};
use indc_indicators::{AnyIndicator, Indicator};
use serde::Deserialize;
use tracing::{debug, info};

/// Prefix for environment overrides, e.g. `INDC__LOG_LEVEL=debug`.
pub const ENV_PREFIX: &str = "INDC";

/// Fully resolved settings.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "AppConfig::default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub indicators: Vec<IndicatorEntry>,
}

impl AppConfig {
    fn default_log_level() -> String {
        "info".to_string()
    }

    /// Looks up a configured indicator by label.
    pub fn indicator(&self, label: &str) -> Option<&AnyIndicator> {
        self.indicators
            .iter()
            .find(|entry| entry.label == label)
            .map(|entry| &entry.indicator)
    }

    fn check(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for entry in &self.indicators {
            if !seen.insert(entry.label.as_str()) {
                bail!("duplicate indicator label '{}'", entry.label);
            }
            entry
                .indicator
                .validate()
                .with_context(|| format!("invalid indicator '{}'", entry.label))?;
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: Self::default_log_level(),
            data: DataConfig::default(),
            indicators: Vec::new(),
        }
    }
}

/// Where candle data is read from.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DataConfig {
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default)]
    pub format: Option<DataFormat>,
}

impl DataConfig {
    /// Explicit format, falling back to the file extension, then CSV.
    pub fn resolved_format(&self, path: &Path) -> DataFormat {
        self.format
            .or_else(|| DataFormat::from_path(path))
            .unwrap_or(DataFormat::Csv)
    }
}

/// Supported candle file layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataFormat {
    Csv,
    Json,
}

impl DataFormat {
    /// Infers the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// A named indicator definition.
#[derive(Debug, Clone, Deserialize)]
pub struct IndicatorEntry {
    pub label: String,
    pub indicator: AnyIndicator,
}

/// Loads the configuration for `env` from `dir`.
///
/// Missing files are skipped, so an empty directory yields the defaults.
pub fn load_config(dir: impl AsRef<Path>, env: &str) -> Result<AppConfig> {
    let dir = dir.as_ref();
    let default_path = dir.join("default");
    let env_path = dir.join(env);
    debug!(dir = %dir.display(), env, "loading configuration");

    let settings = Config::builder()
        .add_source(File::with_name(&default_path.to_string_lossy()).required(false))
        .add_source(File::with_name(&env_path.to_string_lossy()).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .with_context(|| format!("failed to read configuration from {}", dir.display()))?;

    let config: AppConfig = settings
        .try_deserialize()
        .context("failed to parse configuration")?;
    config.check()?;
    info!(
        env,
        indicators = config.indicators.len(),
        "configuration loaded"
    );
    Ok(config)
}
