//! Report command implementation
//!
//! Runs a full report: collect, build the ledger, write the CSV file.

use crate::config::{load_config, LedgerConfig};
use crate::core::report::{ReportCoordinator, ReportSummary};
use crate::domain::LedgerError;
use clap::Args;
use tokio::sync::watch;

/// Exit code for configuration errors
const EXIT_CONFIG: i32 = 2;
/// Exit code for upstream fetch or decode errors
const EXIT_UPSTREAM: i32 = 4;
/// Exit code for any other failure
const EXIT_FATAL: i32 = 5;
/// Exit code when interrupted by a shutdown signal
const EXIT_INTERRUPTED: i32 = 130;

/// Arguments for the report command
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Collect and build the ledger without writing the CSV file
    #[arg(long)]
    pub dry_run: bool,

    /// Override the report timezone (IANA name, e.g. Pacific/Auckland)
    #[arg(long)]
    pub timezone: Option<String>,

    /// Override the directory the CSV file is written to
    #[arg(long)]
    pub output_dir: Option<String>,
}

impl ReportArgs {
    /// Execute the report command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!("Starting report command");

        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        self.apply_overrides(&mut config);

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(EXIT_CONFIG);
        }

        let coordinator = match ReportCoordinator::new(config) {
            Ok(c) => c.with_dry_run(self.dry_run),
            Err(e) => {
                tracing::error!(error = %e, "Failed to create report coordinator");
                eprintln!("Failed to initialize report: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        if self.dry_run {
            println!("🔍 DRY RUN MODE - No report file will be written");
            println!();
        }
        println!("🚀 Collecting sales history...");

        let result = tokio::select! {
            result = coordinator.execute_report() => result,
            _ = wait_for_shutdown(shutdown_signal) => {
                tracing::warn!("Report interrupted by shutdown signal");
                eprintln!("Report interrupted, no file written");
                return Ok(EXIT_INTERRUPTED);
            }
        };

        match result {
            Ok(summary) => {
                summary.log_summary();
                print_summary(&summary);
                Ok(0)
            }
            Err(e) => {
                tracing::error!(error = %e, "Report failed");
                eprintln!("❌ Report failed: {e}");
                Ok(exit_code_for(&e))
            }
        }
    }

    fn apply_overrides(&self, config: &mut LedgerConfig) {
        if let Some(timezone) = &self.timezone {
            tracing::info!(timezone = %timezone, "Overriding report timezone from CLI");
            config.report.timezone = timezone.clone();
        }

        if let Some(output_dir) = &self.output_dir {
            tracing::info!(output_dir = %output_dir, "Overriding output directory from CLI");
            config.report.output_dir = output_dir.clone();
        }
    }
}

/// Process exit code for a failed run
pub fn exit_code_for(error: &LedgerError) -> i32 {
    match error {
        LedgerError::Configuration(_) => EXIT_CONFIG,
        LedgerError::Fetch(_) | LedgerError::Decode(_) => EXIT_UPSTREAM,
        _ => EXIT_FATAL,
    }
}

/// Resolves once the shutdown flag is raised; never if the sender goes away
async fn wait_for_shutdown(mut shutdown_signal: watch::Receiver<bool>) {
    loop {
        if *shutdown_signal.borrow() {
            return;
        }
        if shutdown_signal.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

fn print_summary(summary: &ReportSummary) {
    println!();
    println!("✅ Report completed");
    println!(
        "  Collected: {} sales, {} customers, {} products, {} registers, {} users",
        summary.collected.sales,
        summary.collected.customers,
        summary.collected.products,
        summary.collected.registers,
        summary.collected.users
    );
    println!(
        "  Sales: {} included, {} deleted, {} open",
        summary.ledger.sales_included, summary.ledger.skipped_deleted, summary.ledger.skipped_open
    );
    println!("  Rows: {}", summary.rows());
    match &summary.output_path {
        Some(path) => println!("  Output: {}", path.display()),
        None => println!("  Output: (dry run)"),
    }
    println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
}
