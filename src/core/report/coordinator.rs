//! Report coordinator
//!
//! Runs a complete report: collects the five resources, builds the ledger
//! and writes it out.

use super::summary::{CollectedCounts, ReportSummary};
use super::writer::{report_file_name, write_report_file};
use crate::adapters::retail::{PageSource, ResourceKind, RetailClient};
use crate::config::LedgerConfig;
use crate::core::collect::{Collector, TracingObserver};
use crate::core::ledger::Denormalizer;
use crate::domain::{Customer, Entity, LedgerError, Product, Register, Result, Sale, User};
use chrono_tz::Tz;
use serde::de::DeserializeOwned;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;

/// Report coordinator
pub struct ReportCoordinator {
    config: LedgerConfig,
    collector: Collector,
    timezone: Tz,
    dry_run: bool,
}

impl ReportCoordinator {
    /// Create a coordinator talking to the configured retail API
    pub fn new(config: LedgerConfig) -> Result<Self> {
        let client = RetailClient::new(&config.api)?;
        Self::with_source(config, Arc::new(client))
    }

    /// Create a coordinator reading pages from `source`
    pub fn with_source(config: LedgerConfig, source: Arc<dyn PageSource>) -> Result<Self> {
        config.validate().map_err(LedgerError::Configuration)?;
        let timezone = config.report.tz().map_err(LedgerError::Configuration)?;

        let collector = Collector::new(source)
            .with_observer(Arc::new(TracingObserver))
            .with_page_size(config.api.page_size);

        Ok(Self {
            config,
            collector,
            timezone,
            dry_run: false,
        })
    }

    /// Skip writing the report file
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Execute the report
    ///
    /// 1. Collects sales, customers, products, registers and users
    ///    concurrently, at most `report.max_concurrency` at a time
    /// 2. Builds the ledger in the configured timezone
    /// 3. Writes the CSV file unless this is a dry run
    ///
    /// Any collection failure aborts the run; no partial report is written.
    pub async fn execute_report(&self) -> Result<ReportSummary> {
        let start_time = Instant::now();
        let mut summary = ReportSummary::new(self.dry_run);

        tracing::info!(
            base_url = %self.config.api.resolved_base_url(),
            timezone = %self.timezone,
            dry_run = self.dry_run,
            "Starting report"
        );

        let permits = Semaphore::new(self.config.report.max_concurrency);
        let (sales, customers, products, registers, users) = tokio::try_join!(
            self.collect_bounded::<Sale>(&permits, ResourceKind::Sales),
            self.collect_bounded::<Customer>(&permits, ResourceKind::Customers),
            self.collect_bounded::<Product>(&permits, ResourceKind::Products),
            self.collect_bounded::<Register>(&permits, ResourceKind::Registers),
            self.collect_bounded::<User>(&permits, ResourceKind::Users),
        )?;

        summary.collected = CollectedCounts {
            sales: sales.len(),
            customers: customers.len(),
            products: products.len(),
            registers: registers.len(),
            users: users.len(),
        };

        let ledger = Denormalizer::new(&customers, &products, &registers, &users, self.timezone)
            .build(&sales);
        summary.ledger = ledger.stats.clone();

        if self.dry_run {
            tracing::info!(rows = ledger.rows.len(), "Dry run, report not written");
        } else {
            let path = self.output_path();
            write_report_file(&path, &ledger.rows)?;
            summary.output_path = Some(path);
        }

        let summary = summary.with_duration(start_time.elapsed());
        crate::log_report_complete!(summary.rows(), summary.duration);
        Ok(summary)
    }

    async fn collect_bounded<T>(&self, permits: &Semaphore, resource: ResourceKind) -> Result<Vec<T>>
    where
        T: DeserializeOwned + Entity + Send,
    {
        let _permit = permits
            .acquire()
            .await
            .map_err(|e| LedgerError::Other(format!("Collection pool closed: {e}")))?;

        self.collector.collect::<T>(resource).await.map_err(|e| {
            tracing::error!(resource = %resource, error = %e, "Collection failed");
            e
        })
    }

    fn output_path(&self) -> PathBuf {
        let file_name =
            report_file_name(&self.config.api.domain_prefix, chrono::Utc::now().timestamp());
        PathBuf::from(&self.config.report.output_dir).join(file_name)
    }
}
