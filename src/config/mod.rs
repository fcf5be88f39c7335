//! Configuration management for Salesledger.
//!
//! Salesledger reads a TOML file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `SALESLEDGER_<SECTION>_<KEY>` environment overrides
//! - Default values for optional settings
//! - Validation on load
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level
//! - [`ApiConfig`] - Store domain prefix, API token, paging and retry
//! - [`ReportConfig`] - Report timezone, output directory, collection concurrency
//! - [`LoggingConfig`] - Optional JSON file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [api]
//! domain_prefix = "mystore"
//! token = "${SALESLEDGER_API_TOKEN}"
//!
//! [report]
//! timezone = "Pacific/Auckland"
//! output_dir = "./reports"
//! ```
//!
//! ```rust,no_run
//! use salesledger::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("salesledger.toml")?;
//! println!("Store: {}", config.api.domain_prefix);
//! # Ok(())
//! # }
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{
    ApiConfig, ApplicationConfig, LedgerConfig, LoggingConfig, ReportConfig, RetryConfig,
};
pub use secret::{bearer_header, secret_string, SecretString, SecretValue};
