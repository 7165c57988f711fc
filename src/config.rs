//! Application Configuration
//! Dashboard settings with JSON file and environment overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Public copy of the Titanic manifest.
pub const DEFAULT_DATASET_URL: &str =
    "https://raw.githubusercontent.com/leontoddjohnson/datasets/main/data/titanic.csv";

/// Env var naming a JSON config file.
pub const CONFIG_PATH_ENV: &str = "TITANIC_INSIGHTS_CONFIG";
/// Env var overriding the dataset source.
pub const DATASET_URL_ENV: &str = "TITANIC_DATASET_URL";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid config value: {0}")]
    Invalid(String),
}

/// Dashboard settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP(S) URL or local path of the passenger CSV
    pub dataset_source: String,
    /// Number of surnames shown in the family chart
    pub top_n: usize,
    pub export_dir: PathBuf,
    pub chart_width: u32,
    pub chart_height: u32,
    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dataset_source: DEFAULT_DATASET_URL.to_string(),
            top_n: 10,
            export_dir: PathBuf::from("titanic_report"),
            chart_width: 1000,
            chart_height: 600,
            request_timeout_secs: 30,
        }
    }
}

impl AppConfig {
    /// Load configuration from the environment.
    ///
    /// Reads the JSON file named by `TITANIC_INSIGHTS_CONFIG` when set, then
    /// applies `TITANIC_DATASET_URL` on top.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::env::var_os(CONFIG_PATH_ENV) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };

        if let Ok(source) = std::env::var(DATASET_URL_ENV) {
            if !source.trim().is_empty() {
                config.dataset_source = source.trim().to_string();
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON config file. Missing keys fall back to defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dataset_source.trim().is_empty() {
            return Err(ConfigError::Invalid("dataset_source is empty".into()));
        }
        if self.top_n == 0 {
            return Err(ConfigError::Invalid("top_n must be at least 1".into()));
        }
        if self.chart_width == 0 || self.chart_height == 0 {
            return Err(ConfigError::Invalid(format!(
                "chart size {}x{} is empty",
                self.chart_width, self.chart_height
            )));
        }
        Ok(())
    }
}
