//! Loading and saving dashboard configs as YAML, JSON or TOML

use crate::{ConfigError, DashboardConfig, Result};
use std::fmt;
use std::fs;
use std::path::Path;

/// On-disk encodings a dashboard config can use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
    Toml,
}

impl ConfigFormat {
    /// Format for a file extension, case-insensitive
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Some(ConfigFormat::Yaml),
            "json" => Some(ConfigFormat::Json),
            "toml" => Some(ConfigFormat::Toml),
            _ => None,
        }
    }

    fn label(self) -> &'static str {
        match self {
            ConfigFormat::Yaml => "YAML",
            ConfigFormat::Json => "JSON",
            ConfigFormat::Toml => "TOML",
        }
    }

    fn error(self, action: &str, cause: impl fmt::Display) -> ConfigError {
        ConfigError::Parse(format!("{} {} error: {}", self.label(), action, cause))
    }
}

pub struct ConfigParser;

impl ConfigParser {
    pub fn parse_file(path: impl AsRef<Path>) -> Result<DashboardConfig> {
        let path = path.as_ref();
        let format = Self::detect_format(path)?;
        let content = fs::read_to_string(path)?;

        log::debug!("[ConfigParser] Loading {:?} config from {}", format, path.display());
        Self::parse_string(&content, format)
    }

    pub fn parse_string(content: &str, format: ConfigFormat) -> Result<DashboardConfig> {
        let parsed: std::result::Result<DashboardConfig, String> = match format {
            ConfigFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
            ConfigFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            ConfigFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
        };
        parsed.map_err(|cause| format.error("parse", cause))
    }

    /// Format implied by the file extension
    pub fn detect_format(path: &Path) -> Result<ConfigFormat> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| ConfigError::Parse(format!("{} has no config extension", path.display())))?;

        ConfigFormat::from_extension(ext)
            .ok_or_else(|| ConfigError::Parse(format!("Unsupported config format: {ext}")))
    }
}

/// Writes a config back in any supported format
pub struct ConfigSerializer;

impl ConfigSerializer {
    /// The format follows the file extension
    pub fn serialize_file(config: &DashboardConfig, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = Self::serialize_string(config, ConfigParser::detect_format(path)?)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn serialize_string(config: &DashboardConfig, format: ConfigFormat) -> Result<String> {
        let written = match format {
            ConfigFormat::Yaml => serde_yaml::to_string(config).map_err(|e| e.to_string()),
            ConfigFormat::Json => serde_json::to_string_pretty(config).map_err(|e| e.to_string()),
            ConfigFormat::Toml => toml::to_string_pretty(config).map_err(|e| e.to_string()),
        };
        written.map_err(|cause| format.error("serialize", cause))
    }
}
