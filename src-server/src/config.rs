//! Server configuration read from the environment (and `.env`, via dotenvy).

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use wealthtrack_core::ChartSettings;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8088;
const DEFAULT_DATA_PATH: &str = "data/wealthtrack.json";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub data_path: PathBuf,
    pub chart_settings: ChartSettings,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup; keeps tests off the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("PORT must be a port number, got '{}'", raw))?,
            None => DEFAULT_PORT,
        };
        let data_path = lookup("WEALTHTRACK_DATA")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));

        let percentages = lookup("PREDICTION_PERCENTAGES");
        let remove_first = lookup("REMOVE_FIRST_X_ENTRIES_FROM_CHARTS");
        let chart_settings =
            ChartSettings::from_values(percentages.as_deref(), remove_first.as_deref())
                .context("Invalid chart configuration")?;

        Ok(Config {
            host,
            port,
            data_path,
            chart_settings,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.bind_address(), "127.0.0.1:8088");
        assert_eq!(config.data_path, PathBuf::from("data/wealthtrack.json"));
        assert_eq!(config.chart_settings, ChartSettings::default());
    }

    #[test]
    fn reads_chart_settings() {
        let config = config_from(&[
            ("PREDICTION_PERCENTAGES", "1,3,5,7"),
            ("REMOVE_FIRST_X_ENTRIES_FROM_CHARTS", "2"),
            ("PORT", "9000"),
        ])
        .unwrap();

        assert_eq!(
            config.chart_settings.prediction_percentages,
            vec![1.0, 3.0, 5.0, 7.0]
        );
        assert_eq!(config.chart_settings.remove_first_x_entries, 2);
        assert_eq!(config.port, 9000);
    }

    #[test]
    fn malformed_percentages_abort() {
        assert!(config_from(&[("PREDICTION_PERCENTAGES", "5,ten")]).is_err());
        assert!(config_from(&[("PORT", "http")]).is_err());
    }
}
