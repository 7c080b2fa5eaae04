use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

pub const DEFAULT_EXCHANGE_RATE_URL: &str = "https://v6.exchangerate-api.com";
pub const DEFAULT_HISTORICAL_FILE: &str = "dailyrus.xlsx";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ExchangeRateApiConfig {
    #[serde(default = "default_exchange_rate_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
}

fn default_exchange_rate_url() -> String {
    DEFAULT_EXCHANGE_RATE_URL.to_string()
}

impl Default for ExchangeRateApiConfig {
    fn default() -> Self {
        ExchangeRateApiConfig {
            base_url: default_exchange_rate_url(),
            api_key: None,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub exchange_rate: ExchangeRateApiConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct HistoricalConfig {
    pub path: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub historical: HistoricalConfig,
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("dev", "fxconv", "fxconv").context("Could not determine project directories")
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        Ok(project_dirs()?.config_dir().join("config.yaml"))
    }

    /// Location of the historical rate spreadsheet.
    ///
    /// Relative paths in the config are kept as-is and resolve against the
    /// working directory.
    pub fn historical_path(&self) -> Result<PathBuf> {
        if let Some(custom_path) = &self.historical.path {
            return Ok(PathBuf::from(custom_path));
        }
        Ok(project_dirs()?.data_dir().join(DEFAULT_HISTORICAL_FILE))
    }

    pub fn api_key(&self) -> Result<&str> {
        self.providers
            .exchange_rate
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .context("No API key configured under providers.exchange_rate.api_key")
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}
