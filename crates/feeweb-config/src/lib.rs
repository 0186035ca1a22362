//! Configuration management for feeweb
//!
//! This module handles loading, validation, and management of
//! feeweb configuration from YAML files.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use error::ConfigError;

// ==================== Configuration Types ====================

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8082
}

/// Data directory configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Path to the data directory
    #[serde(default = "default_data_path")]
    pub path: PathBuf,
    /// Seed file with demand/transaction/directory records (JSON)
    #[serde(default = "default_seed_file")]
    pub seed_file: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: default_data_path(),
            seed_file: default_seed_file(),
        }
    }
}

fn default_data_path() -> PathBuf {
    PathBuf::from("./data")
}

fn default_seed_file() -> String {
    "records.json".to_string()
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Pagination settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Records per page for lists
    #[serde(default = "default_records_per_page")]
    pub records_per_page: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            records_per_page: default_records_per_page(),
        }
    }
}

fn default_records_per_page() -> usize {
    50
}

/// Collection report limits and dashboard sizing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportsConfig {
    /// Maximum date range (in days) a single collection report may cover
    #[serde(default = "default_max_range_days")]
    pub max_range_days: i64,
    /// Maximum transaction rows a single report may scan
    #[serde(default = "default_max_scan_rows")]
    pub max_scan_rows: usize,
    /// Number of top colleges/courses on the dashboard
    #[serde(default = "default_top_items")]
    pub top_items_count: usize,
    /// Number of recent transactions on the dashboard
    #[serde(default = "default_recent_count")]
    pub recent_count: usize,
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            max_range_days: default_max_range_days(),
            max_scan_rows: default_max_scan_rows(),
            top_items_count: default_top_items(),
            recent_count: default_recent_count(),
        }
    }
}

fn default_max_range_days() -> i64 {
    366
}

fn default_max_scan_rows() -> usize {
    100_000
}

fn default_top_items() -> usize {
    5
}

fn default_recent_count() -> usize {
    10
}

/// Currency and number formatting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyConfig {
    /// Default currency code
    #[serde(default = "default_currency")]
    pub code: String,
    /// Number of decimal places
    #[serde(default = "default_decimal_places")]
    pub decimal_places: u32,
    /// Thousands separator
    #[serde(default = "default_thousands_sep")]
    pub thousands_separator: String,
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            code: default_currency(),
            decimal_places: default_decimal_places(),
            thousands_separator: default_thousands_sep(),
        }
    }
}

fn default_currency() -> String {
    "INR".to_string()
}

fn default_decimal_places() -> u32 {
    2
}

fn default_thousands_sep() -> String {
    ",".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Data directory settings
    #[serde(default)]
    pub data: DataConfig,
    /// Pagination settings
    #[serde(default)]
    pub pagination: PaginationConfig,
    /// Report limits and dashboard sizing
    #[serde(default)]
    pub reports: ReportsConfig,
    /// Currency settings
    #[serde(default)]
    pub currency: CurrencyConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: PathBuf) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(&path)
            .map_err(|_| ConfigError::IoError)?;

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|_| ConfigError::InvalidYaml)?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        if self.reports.max_range_days < 1 {
            return Err(ConfigError::InvalidValue {
                field: "reports.max_range_days".to_string(),
                reason: "Report range ceiling must be at least 1 day".to_string(),
            });
        }

        if self.reports.max_scan_rows == 0 {
            return Err(ConfigError::InvalidValue {
                field: "reports.max_scan_rows".to_string(),
                reason: "Row scan ceiling must be greater than 0".to_string(),
            });
        }

        if self.currency.decimal_places > 10 {
            return Err(ConfigError::InvalidValue {
                field: "currency.decimal_places".to_string(),
                reason: "Decimal places must be between 0 and 10".to_string(),
            });
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }

    /// Get the full path to the seed records file
    pub fn seed_path(&self) -> PathBuf {
        self.data.path.join(&self.data.seed_file)
    }
}

// ==================== Tests ====================
