pub mod cli;
pub mod core;
pub mod providers;

use crate::core::config::AppConfig;
use crate::core::historical::{HistoricalRateQuery, HistoricalRateResolver};
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    Convert {
        base: String,
        target: String,
        amount: String,
    },
    Historical {
        year: String,
        date: String,
        currency: String,
    },
    Currencies {
        code: Option<String>,
    },
}

fn load_config(config_path: Option<&str>) -> Result<AppConfig> {
    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => {
            let default_path = AppConfig::default_config_path()?;
            if default_path.exists() {
                AppConfig::load_from_path(&default_path)?
            } else {
                debug!(
                    "No config at {}, using defaults",
                    default_path.display()
                );
                AppConfig::default()
            }
        }
    };
    debug!(
        base_url = %config.providers.exchange_rate.base_url,
        historical = ?config.historical.path,
        "Loaded config"
    );
    Ok(config)
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("fxconv starting...");

    match command {
        AppCommand::Currencies { code } => cli::currencies::run(code.as_deref()),
        AppCommand::Convert {
            base,
            target,
            amount,
        } => {
            let config = load_config(config_path)?;
            let provider = providers::ExchangeRateApiProvider::new(
                &config.providers.exchange_rate.base_url,
                config.api_key()?,
            );
            cli::convert::run(&provider, &base, &target, &amount).await
        }
        AppCommand::Historical {
            year,
            date,
            currency,
        } => {
            let config = load_config(config_path)?;
            let resolver = Arc::new(HistoricalRateResolver::new(
                Arc::new(providers::XlsxTableSource::new()),
                config.historical_path()?,
            ));
            let query = HistoricalRateQuery {
                year,
                date,
                currency,
            };
            cli::historical::run(resolver, query).await
        }
    }
}
