//! Report run summary

use crate::core::ledger::LedgerStats;
use std::path::PathBuf;
use std::time::Duration;

/// Number of entities collected per resource
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectedCounts {
    pub sales: usize,
    pub customers: usize,
    pub products: usize,
    pub registers: usize,
    pub users: usize,
}

impl CollectedCounts {
    pub fn total(&self) -> usize {
        self.sales + self.customers + self.products + self.registers + self.users
    }
}

/// Summary of a report run
#[derive(Debug, Clone, Default)]
pub struct ReportSummary {
    /// Entities collected per resource
    pub collected: CollectedCounts,

    /// Counters from the ledger build
    pub ledger: LedgerStats,

    /// Written report, `None` on a dry run
    pub output_path: Option<PathBuf>,

    /// Duration of the whole run
    pub duration: Duration,

    /// Whether writing the report was skipped
    pub dry_run: bool,
}

impl ReportSummary {
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Default::default()
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Rows emitted into the ledger
    pub fn rows(&self) -> usize {
        self.ledger.rows
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            sales = self.collected.sales,
            customers = self.collected.customers,
            products = self.collected.products,
            registers = self.collected.registers,
            users = self.collected.users,
            sales_included = self.ledger.sales_included,
            skipped_deleted = self.ledger.skipped_deleted,
            skipped_open = self.ledger.skipped_open,
            rows = self.ledger.rows,
            output = ?self.output_path,
            dry_run = self.dry_run,
            duration_secs = self.duration.as_secs(),
            "Report completed"
        );

        let unmatched = self.ledger.unmatched_customers
            + self.ledger.unmatched_registers
            + self.ledger.unmatched_users
            + self.ledger.unmatched_products;
        if unmatched > 0 {
            tracing::debug!(
                customers = self.ledger.unmatched_customers,
                registers = self.ledger.unmatched_registers,
                users = self.ledger.unmatched_users,
                products = self.ledger.unmatched_products,
                "References without a matching entity"
            );
        }
    }
}
