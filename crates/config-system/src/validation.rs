//! Configuration validation utilities

use crate::{ChartConfig, ConfigError, DashboardConfig, LoggingConfig, Result, SessionConfig};

/// Longest simulated identity round-trip accepted
const MAX_DEV_LATENCY_MS: u64 = 60_000;

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Configuration validator with comprehensive checks
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration
    pub fn validate(config: &DashboardConfig) -> Result<()> {
        if config.version.trim().is_empty() {
            return Err(ConfigError::Validation(
                "Version cannot be empty".to_string(),
            ));
        }

        Self::validate_chart(&config.chart)?;
        Self::validate_session(&config.session)?;
        Self::validate_logging(&config.logging)?;

        Ok(())
    }

    fn validate_chart(chart: &ChartConfig) -> Result<()> {
        if chart.series_name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "Chart series_name cannot be empty".to_string(),
            ));
        }

        let style = &chart.style;
        if !(0.0..=20.0).contains(&style.border_width) {
            return Err(ConfigError::Validation(format!(
                "Invalid border width: {}. Must be between 0.0 and 20.0",
                style.border_width
            )));
        }

        if !(0.0..=1.0).contains(&style.tension) {
            return Err(ConfigError::Validation(format!(
                "Invalid tension: {}. Must be between 0.0 and 1.0",
                style.tension
            )));
        }

        Ok(())
    }

    fn validate_session(session: &SessionConfig) -> Result<()> {
        let latency = session.dev_provider.latency_ms;
        if latency > MAX_DEV_LATENCY_MS {
            return Err(ConfigError::Validation(format!(
                "Invalid dev provider latency: {}ms. Must be at most {}ms",
                latency, MAX_DEV_LATENCY_MS
            )));
        }

        if session.dev_provider.auto_login {
            log::warn!("[ConfigValidator] Dev provider auto_login is enabled; the demo user is restored at startup");
        }

        Ok(())
    }

    fn validate_logging(logging: &LoggingConfig) -> Result<()> {
        let level = logging.level.to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::Validation(format!(
                "Invalid log level: {}. Must be one of {}",
                logging.level,
                LOG_LEVELS.join(", ")
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ConfigValidator::validate(&DashboardConfig::default()).is_ok());
    }

    #[test]
    fn test_rejects_empty_series_name() {
        let mut config = DashboardConfig::default();
        config.chart.series_name = "  ".to_string();
        assert!(matches!(
            ConfigValidator::validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_rejects_out_of_range_style() {
        let mut config = DashboardConfig::default();
        config.chart.style.tension = 1.5;
        assert!(ConfigValidator::validate(&config).is_err());

        let mut config = DashboardConfig::default();
        config.chart.style.border_width = -1.0;
        assert!(ConfigValidator::validate(&config).is_err());
    }

    #[test]
    fn test_rejects_slow_dev_provider() {
        let mut config = DashboardConfig::default();
        config.session.dev_provider.latency_ms = 120_000;
        let err = ConfigValidator::validate(&config).unwrap_err();
        assert!(err.to_string().contains("latency"));
    }

    #[test]
    fn test_log_level() {
        let mut config = DashboardConfig::default();
        config.logging.level = "DEBUG".to_string();
        assert!(ConfigValidator::validate(&config).is_ok());

        config.logging.level = "verbose".to_string();
        assert!(ConfigValidator::validate(&config).is_err());
    }

    #[test]
    fn test_rejects_empty_version() {
        let mut config = DashboardConfig::default();
        config.version = String::new();
        assert!(ConfigValidator::validate(&config).is_err());
    }
}
