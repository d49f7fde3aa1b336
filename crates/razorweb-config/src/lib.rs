//! Configuration management for razorweb
//!
//! This module handles loading, validation, and management of
//! razorweb configuration from YAML files.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use error::{ConfigError, ConfigResult};

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
    8081
}

/// Remote transaction lookup endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Endpoint receiving `{"from", "to"}` and answering `{"items": [...]}`
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Request timeout in seconds (None = no timeout)
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: None,
        }
    }
}

fn default_endpoint() -> String {
    "https://nishkamapi.onrender.com/api/v1/Razortransactions".to_string()
}

/// Table pagination and sorting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableConfig {
    /// Rows per page on first render
    #[serde(default = "default_records_per_page")]
    pub records_per_page: usize,
    /// Page sizes offered in the selector
    #[serde(default = "default_page_size_options")]
    pub page_size_options: Vec<usize>,
    /// Sort amount / captured date by raw value instead of displayed text
    #[serde(default)]
    pub numeric_sort: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            records_per_page: default_records_per_page(),
            page_size_options: default_page_size_options(),
            numeric_sort: false,
        }
    }
}

fn default_records_per_page() -> usize {
    10
}

fn default_page_size_options() -> Vec<usize> {
    vec![10, 25, 50, 75, 100, 10000]
}

/// Value formatting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Page heading
    #[serde(default = "default_title")]
    pub title: String,
    /// Glyph prefixed to amounts
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    /// Offset applied to timestamps, minutes east of UTC
    #[serde(default = "default_utc_offset")]
    pub utc_offset_minutes: i32,
    /// chrono format string for timestamps
    #[serde(default = "default_datetime_format")]
    pub datetime_format: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            currency_symbol: default_currency_symbol(),
            utc_offset_minutes: default_utc_offset(),
            datetime_format: default_datetime_format(),
        }
    }
}

fn default_title() -> String {
    "Razorpay Transactions".to_string()
}

fn default_currency_symbol() -> String {
    "₹".to_string()
}

fn default_utc_offset() -> i32 {
    330
}

fn default_datetime_format() -> String {
    "%-m/%-d/%Y, %-I:%M:%S %p".to_string()
}

/// Delimited-text export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Field delimiter (single ASCII character)
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
    /// Quote fields containing the delimiter, quotes or newlines
    #[serde(default = "default_true")]
    pub quote_fields: bool,
    /// Download file name prefix, followed by a timestamp
    #[serde(default = "default_filename_prefix")]
    pub filename_prefix: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
            quote_fields: true,
            filename_prefix: default_filename_prefix(),
        }
    }
}

impl ExportConfig {
    /// Delimiter as a byte. Only meaningful after validation.
    pub fn delimiter_byte(&self) -> u8 {
        self.delimiter.as_bytes().first().copied().unwrap_or(b'|')
    }
}

fn default_delimiter() -> String {
    "|".to_string()
}

fn default_filename_prefix() -> String {
    "Student_Acedamic_Data".to_string()
}

fn default_true() -> bool {
    true
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
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

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Remote endpoint settings
    #[serde(default)]
    pub gateway: GatewayConfig,
    /// Table settings
    #[serde(default)]
    pub table: TableConfig,
    /// Formatting settings
    #[serde(default)]
    pub display: DisplayConfig,
    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: PathBuf) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(&path).map_err(|source| {
            let path = path.to_string_lossy().to_string();
            match source.kind() {
                std::io::ErrorKind::NotFound => ConfigError::FileNotFound { path },
                _ => ConfigError::Io { path, source },
            }
        })?;

        Self::from_yaml(&content)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> ConfigResult<Self> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::InvalidYaml { message: e.to_string() })?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        if self.server.port == 0 {
            return Err(invalid("server.port", "Port must be greater than 0"));
        }

        let endpoint = &self.gateway.endpoint;
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(invalid("gateway.endpoint", "Endpoint must be an http:// or https:// URL"));
        }

        let options = &self.table.page_size_options;
        if options.is_empty() || options.contains(&0) {
            return Err(invalid("table.page_size_options", "Page sizes must be a non-empty list of positive numbers"));
        }
        if !options.contains(&self.table.records_per_page) {
            return Err(invalid("table.records_per_page", "Rows per page must be one of table.page_size_options"));
        }

        if self.display.utc_offset_minutes.abs() >= 24 * 60 {
            return Err(invalid("display.utc_offset_minutes", "Offset must be within one day of UTC"));
        }

        let delimiter = self.export.delimiter.as_bytes();
        if delimiter.len() != 1 || !delimiter[0].is_ascii() || matches!(delimiter[0], b'"' | b'\n' | b'\r') {
            return Err(invalid("export.delimiter", "Delimiter must be a single ASCII character other than a quote or newline"));
        }

        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(invalid("logging.level", "Level must be one of error, warn, info, debug, trace"));
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }

    /// Address the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invalid_field(yaml: &str) -> String {
        match Config::from_yaml(yaml) {
            Err(ConfigError::InvalidValue { field, .. }) => field,
            other => panic!("expected InvalidValue, got {:?}", other),
        }
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.table.records_per_page, 10);
        assert_eq!(config.table.page_size_options, vec![10, 25, 50, 75, 100, 10000]);
        assert_eq!(config.export.delimiter_byte(), b'|');
        assert!(config.gateway.timeout_secs.is_none());
    }

    #[test]
    fn test_bundled_template_matches_defaults() {
        let config = Config::from_yaml(Config::generate_default()).unwrap();
        let defaults = Config::default();

        assert_eq!(config.server.port, defaults.server.port);
        assert_eq!(config.gateway.endpoint, defaults.gateway.endpoint);
        assert_eq!(config.gateway.timeout_secs, None);
        assert_eq!(config.display.currency_symbol, "₹");
        assert_eq!(config.display.utc_offset_minutes, 330);
        assert_eq!(config.export.filename_prefix, "Student_Acedamic_Data");
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config = Config::from_yaml("server:\n  port: 9000\ntable:\n  numeric_sort: true\n").unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert!(config.table.numeric_sort);
        assert_eq!(config.table.records_per_page, 10);
        assert_eq!(config.bind_address(), "0.0.0.0:9000");
    }

    #[test]
    fn test_empty_document_is_default() {
        let config = Config::from_yaml("{}").unwrap();
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_invalid_yaml() {
        let result = Config::from_yaml("server: [unclosed");
        assert!(matches!(result, Err(ConfigError::InvalidYaml { .. })));
    }

    #[test]
    fn test_validation_failures() {
        assert_eq!(invalid_field("server:\n  port: 0\n"), "server.port");
        assert_eq!(invalid_field("gateway:\n  endpoint: ftp://example.com\n"), "gateway.endpoint");
        assert_eq!(invalid_field("table:\n  page_size_options: []\n"), "table.page_size_options");
        assert_eq!(invalid_field("table:\n  page_size_options: [0, 10]\n"), "table.page_size_options");
        assert_eq!(invalid_field("table:\n  records_per_page: 20\n"), "table.records_per_page");
        assert_eq!(invalid_field("display:\n  utc_offset_minutes: 1440\n"), "display.utc_offset_minutes");
        assert_eq!(invalid_field("export:\n  delimiter: '||'\n"), "export.delimiter");
        assert_eq!(invalid_field("export:\n  delimiter: '\"'\n"), "export.delimiter");
        assert_eq!(invalid_field("logging:\n  level: loud\n"), "logging.level");
    }

    #[test]
    fn test_missing_file() {
        let result = Config::load(PathBuf::from("/nonexistent/razorweb.yaml"));
        assert!(matches!(result, Err(ConfigError::FileNotFound { .. })));
    }
}
