use crate::error::{Result, StockError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_DATA_FILE: &str = "stock_celulares.csv";
const DEFAULT_CURRENCY: &str = "$";

pub const KEYS: [&str; 2] = ["data-file", "currency"];

/// Configuration for phonestock, stored in `config.json` in the user config dir.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StockConfig {
    /// Path of the stock data file; relative paths resolve against the working directory
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    /// Symbol printed in front of prices
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_data_file() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_FILE)
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

impl Default for StockConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            currency: default_currency(),
        }
    }
}

impl StockConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: StockConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "data-file" => Some(self.data_file.display().to_string()),
            "currency" => Some(self.currency.clone()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        if value.is_empty() {
            return Err(StockError::Api(format!("{} cannot be empty", key)));
        }
        match key {
            "data-file" => self.data_file = PathBuf::from(value),
            "currency" => self.currency = value.to_string(),
            other => return Err(StockError::Api(format!("Unknown config key: {}", other))),
        }
        Ok(())
    }

    /// Formats a whole-unit price with the configured currency symbol.
    pub fn price(&self, amount: u32) -> String {
        format!("{}{}", self.currency, amount)
    }
}
