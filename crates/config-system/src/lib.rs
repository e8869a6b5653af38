//! Configuration system for the DataViz dashboard
//! Manages store policies, chart defaults, session behaviour and logging

use dataviz_shared::{SeriesStyle, DEFAULT_SERIES_NAME};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod parser;
pub mod validation;

pub use parser::{ConfigFormat, ConfigParser, ConfigSerializer};
pub use validation::ConfigValidator;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Top-level dashboard configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DashboardConfig {
    pub version: String,
    pub store: StoreConfig,
    pub chart: ChartConfig,
    pub session: SessionConfig,
    pub logging: LoggingConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            version: "1.0.0".to_string(),
            store: StoreConfig::default(),
            chart: ChartConfig::default(),
            session: SessionConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// What a store does when an operation names an absent id or an invalid value
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum MutationPolicy {
    /// Skip the operation silently (mismatched options are applied with a warning)
    #[default]
    Lenient,
    /// Reject with `NotFound` / `Validation`
    Strict,
}

/// What happens when a sign-in starts while another is still running
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum InFlightPolicy {
    /// Refuse the second attempt; the first one completes normally
    #[default]
    Reject,
    /// Start the second attempt; only the newest attempt may settle the session
    LatestWins,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StoreConfig {
    pub mutation_policy: MutationPolicy,
    /// Start with the built-in sample variables and data points
    pub seed_sample_data: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            mutation_policy: MutationPolicy::Lenient,
            seed_sample_data: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ChartConfig {
    pub series_name: String,
    pub style: SeriesStyle,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            series_name: DEFAULT_SERIES_NAME.to_string(),
            style: SeriesStyle::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct SessionConfig {
    pub in_flight_policy: InFlightPolicy,
    pub dev_provider: DevProviderConfig,
}

/// Settings for the in-memory development identity provider
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DevProviderConfig {
    /// Simulated round-trip to the identity service
    pub latency_ms: u64,
    /// Restore the demo user at startup without asking for credentials
    pub auto_login: bool,
}

impl Default for DevProviderConfig {
    fn default() -> Self {
        Self {
            latency_ms: 1000,
            auto_login: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
