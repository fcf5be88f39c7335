//! Configuration schema types
//!
//! This module defines the configuration structure for Salesledger.

use crate::config::SecretString;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Largest page the retail API will serve
pub const MAX_PAGE_SIZE: u32 = 10_000;

/// Main Salesledger configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Retail API connection settings
    pub api: ApiConfig,

    /// Report settings
    #[serde(default)]
    pub report: ReportConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl LedgerConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.api.validate()?;
        self.report.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Retry configuration for the HTTP transport
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts per request
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,

    /// Initial delay in milliseconds
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,

    /// Maximum delay in milliseconds
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,

    /// Backoff multiplier
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,
}

impl RetryConfig {
    fn validate(&self) -> Result<(), String> {
        if self.max_retries == 0 || self.max_retries > 10 {
            return Err(format!(
                "api.retry.max_retries must be between 1 and 10, got {}",
                self.max_retries
            ));
        }

        if self.backoff_multiplier < 1.0 {
            return Err(format!(
                "api.retry.backoff_multiplier must be >= 1.0, got {}",
                self.backoff_multiplier
            ));
        }

        Ok(())
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            backoff_multiplier: default_backoff_multiplier(),
        }
    }
}

/// Retail API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Store sub-domain, e.g. "mystore" for mystore.vendhq.com
    pub domain_prefix: String,

    /// Personal API token
    /// Stored securely in memory and automatically zeroized on drop
    pub token: SecretString,

    /// Explicit API base URL; derived from `domain_prefix` when absent
    #[serde(default)]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Entities requested per page
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// TLS certificate verification enabled
    ///
    /// Only disable this against a local test server.
    #[serde(default = "default_true")]
    pub tls_verify: bool,

    /// Retry configuration
    #[serde(default)]
    pub retry: RetryConfig,
}

impl ApiConfig {
    /// The base URL requests are made against, without a trailing slash
    ///
    /// # Examples
    ///
    /// ```
    /// use salesledger::config::{secret_string, ApiConfig};
    ///
    /// let config = ApiConfig::new("mystore", secret_string("token".to_string()));
    /// assert_eq!(config.resolved_base_url(), "https://mystore.vendhq.com/api/2.0");
    /// ```
    pub fn resolved_base_url(&self) -> String {
        match &self.base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("https://{}.vendhq.com/api/2.0", self.domain_prefix),
        }
    }

    /// API settings with defaults for everything but the store and token
    pub fn new(domain_prefix: impl Into<String>, token: SecretString) -> Self {
        Self {
            domain_prefix: domain_prefix.into(),
            token,
            base_url: None,
            timeout_seconds: default_timeout_seconds(),
            page_size: default_page_size(),
            tls_verify: true,
            retry: RetryConfig::default(),
        }
    }

    fn validate(&self) -> Result<(), String> {
        use secrecy::ExposeSecret;

        if self.domain_prefix.is_empty() {
            return Err("api.domain_prefix cannot be empty".to_string());
        }

        let valid_label = self
            .domain_prefix
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-');
        if !valid_label || self.domain_prefix.starts_with('-') || self.domain_prefix.ends_with('-')
        {
            return Err(format!(
                "api.domain_prefix '{}' is not a valid sub-domain label",
                self.domain_prefix
            ));
        }

        if self.token.expose_secret().is_empty() {
            return Err("api.token cannot be empty".to_string());
        }

        if let Some(raw) = &self.base_url {
            let parsed = url::Url::parse(raw)
                .map_err(|e| format!("api.base_url '{raw}' is not a valid URL: {e}"))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err("api.base_url must start with http:// or https://".to_string());
            }
        }

        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(format!(
                "api.page_size must be between 1 and {MAX_PAGE_SIZE}, got {}",
                self.page_size
            ));
        }

        if self.timeout_seconds == 0 {
            return Err("api.timeout_seconds must be greater than 0".to_string());
        }

        self.retry.validate()?;
        Ok(())
    }
}

/// Report configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// IANA timezone sale dates are reported in
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// Directory the CSV file is written to
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Resources collected at the same time (one task per resource kind)
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
}

impl ReportConfig {
    /// The configured timezone
    ///
    /// # Errors
    ///
    /// Returns an error if the name is not a known IANA timezone
    pub fn tz(&self) -> Result<Tz, String> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| format!("Unknown report.timezone '{}'", self.timezone))
    }

    fn validate(&self) -> Result<(), String> {
        self.tz()?;

        if self.output_dir.is_empty() {
            return Err("report.output_dir cannot be empty".to_string());
        }

        if self.max_concurrency == 0 || self.max_concurrency > 5 {
            return Err(format!(
                "report.max_concurrency must be between 1 and 5, got {}",
                self.max_concurrency
            ));
        }

        Ok(())
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            output_dir: default_output_dir(),
            max_concurrency: default_max_concurrency(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for log files
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation (daily, hourly)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled is true".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_page_size() -> u32 {
    MAX_PAGE_SIZE
}

fn default_max_retries() -> usize {
    3
}

fn default_initial_delay_ms() -> u64 {
    1000
}

fn default_max_delay_ms() -> u64 {
    30000
}

fn default_backoff_multiplier() -> f64 {
    2.0
}

fn default_timezone() -> String {
    "UTC".to_string()
}

fn default_output_dir() -> String {
    ".".to_string()
}

fn default_max_concurrency() -> usize {
    5
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;

    fn api() -> ApiConfig {
        ApiConfig::new("mystore", secret_string("token".to_string()))
    }

    #[test]
    fn test_application_config_validation() {
        let mut config = ApplicationConfig::default();
        assert!(config.validate().is_ok());

        config.log_level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_api_config_validation() {
        assert!(api().validate().is_ok());

        let mut config = api();
        config.domain_prefix = String::new();
        assert!(config.validate().is_err());

        let mut config = api();
        config.domain_prefix = "my.store".to_string();
        assert!(config.validate().is_err());

        let mut config = api();
        config.token = secret_string(String::new());
        assert!(config.validate().is_err());

        let mut config = api();
        config.page_size = MAX_PAGE_SIZE + 1;
        assert!(config.validate().is_err());

        let mut config = api();
        config.base_url = Some("ftp://example.com".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_base_url_override_is_trimmed() {
        let mut config = api();
        config.base_url = Some("http://127.0.0.1:1234/".to_string());
        assert_eq!(config.resolved_base_url(), "http://127.0.0.1:1234");
    }

    #[test]
    fn test_report_timezone_validation() {
        let mut config = ReportConfig::default();
        assert_eq!(config.tz().unwrap(), chrono_tz::UTC);

        config.timezone = "Pacific/Auckland".to_string();
        assert!(config.validate().is_ok());

        config.timezone = "Mars/Olympus_Mons".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_report_concurrency_bounds() {
        let mut config = ReportConfig::default();
        config.max_concurrency = 0;
        assert!(config.validate().is_err());
        config.max_concurrency = 6;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_retry_validation() {
        let mut retry = RetryConfig::default();
        assert!(retry.validate().is_ok());
        retry.max_retries = 0;
        assert!(retry.validate().is_err());
    }

    #[test]
    fn test_logging_config_default() {
        let config = LoggingConfig::default();
        assert!(!config.local_enabled);
        assert_eq!(config.local_path, "./logs");
        assert_eq!(config.local_rotation, "daily");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_values() {
        assert_eq!(default_page_size(), 10_000);
        assert_eq!(default_timeout_seconds(), 30);
        assert_eq!(default_timezone(), "UTC");
        assert_eq!(default_max_concurrency(), 5);
    }
}
