//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Salesledger using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Salesledger - Retail sales history exporter
#[derive(Parser, Debug)]
#[command(name = "salesledger")]
#[command(version, about, long_about = None)]
#[command(author = "Salesledger Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "salesledger.toml", env = "SALESLEDGER_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "SALESLEDGER_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Collect sales and reference data and write the sales history CSV
    Report(commands::report::ReportArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_report() {
        let cli = Cli::parse_from(["salesledger", "report"]);
        assert_eq!(cli.config, "salesledger.toml");
        assert!(matches!(cli.command, Commands::Report(_)));
    }

    #[test]
    fn test_cli_parse_report_overrides() {
        let cli = Cli::parse_from([
            "salesledger",
            "report",
            "--dry-run",
            "--timezone",
            "Europe/London",
            "--output-dir",
            "/tmp/out",
        ]);
        let Commands::Report(args) = cli.command else {
            panic!("expected report command");
        };
        assert!(args.dry_run);
        assert_eq!(args.timezone.as_deref(), Some("Europe/London"));
        assert_eq!(args.output_dir.as_deref(), Some("/tmp/out"));
    }

    #[test]
    fn test_cli_parse_with_config_and_log_level() {
        let cli = Cli::parse_from([
            "salesledger",
            "--config",
            "custom.toml",
            "--log-level",
            "debug",
            "validate-config",
        ]);
        assert_eq!(cli.config, "custom.toml");
        assert_eq!(cli.log_level, Some("debug".to_string()));
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["salesledger", "init", "--force"]);
        let Commands::Init(args) = cli.command else {
            panic!("expected init command");
        };
        assert!(args.force);
        assert_eq!(args.output, "salesledger.toml");
    }
}
