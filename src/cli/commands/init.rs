//! Init command implementation
//!
//! Writes a sample configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Sample configuration written by `init`
const SAMPLE_CONFIG: &str = r#"# Salesledger Configuration File
# Retail sales history exporter

[application]
log_level = "info"  # trace | debug | info | warn | error

[api]
# Store sub-domain; the API base URL is https://<domain_prefix>.vendhq.com/api/2.0
domain_prefix = "mystore"
# Personal API token, read from the environment
token = "${SALESLEDGER_API_TOKEN}"
# base_url = "https://mystore.vendhq.com/api/2.0"
timeout_seconds = 30
page_size = 10000
tls_verify = true

[api.retry]
max_retries = 3
initial_delay_ms = 1000
max_delay_ms = 30000
backoff_multiplier = 2.0

[report]
timezone = "Pacific/Auckland"  # IANA timezone name
output_dir = "."
max_concurrency = 5

[logging]
local_enabled = false
local_path = "./logs"
local_rotation = "daily"  # daily | hourly
"#;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "salesledger.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        match fs::write(&self.output, SAMPLE_CONFIG) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your store's domain prefix and timezone", self.output);
                println!("  2. Set SALESLEDGER_API_TOKEN in your environment or a .env file");
                println!("  3. Validate configuration: salesledger validate-config");
                println!("  4. Run a report: salesledger report");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5)
            }
        }
    }
}
