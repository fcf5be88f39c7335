//! Validate config command implementation

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    ///
    /// Loading already validates; a failure at either step exits with 2.
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        let timezone = match config.report.tz() {
            Ok(tz) => tz,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Domain Prefix: {}", config.api.domain_prefix);
        println!("  API Base URL: {}", config.api.resolved_base_url());
        println!("  API Token: [REDACTED]");
        println!("  Page Size: {}", config.api.page_size);
        println!("  Timeout: {}s", config.api.timeout_seconds);
        println!("  Max Retries: {}", config.api.retry.max_retries);
        println!("  Timezone: {timezone}");
        println!("  Output Directory: {}", config.report.output_dir);
        println!("  Max Concurrency: {}", config.report.max_concurrency);
        println!(
            "  File Logging: {}",
            if config.logging.local_enabled {
                config.logging.local_path.as_str()
            } else {
                "disabled"
            }
        );
        println!();
        Ok(0)
    }
}
