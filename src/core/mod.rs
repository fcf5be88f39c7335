//! Core business logic for Salesledger.
//!
//! # Modules
//!
//! - [`collect`] - Cursor-paginated collection of retail resources
//! - [`ledger`] - Denormalization of sales into flat ledger rows
//! - [`report`] - Report orchestration and CSV output
//!
//! # Report Workflow
//!
//! 1. **Collect**: Page through sales, customers and products; fetch
//!    registers and users in one request each
//! 2. **Filter**: Drop deleted and parked (OPEN) sales
//! 3. **Join**: Resolve customer, register, user and product references
//! 4. **Flatten**: Emit a header row, line-item rows and payment rows per sale
//! 5. **Write**: Encode the rows as CSV
//!
//! # Example
//!
//! ```rust,no_run
//! use salesledger::config::load_config;
//! use salesledger::core::report::ReportCoordinator;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("salesledger.toml")?;
//! let coordinator = ReportCoordinator::new(config)?;
//!
//! let summary = coordinator.execute_report().await?;
//! println!("Rows: {}", summary.rows());
//! # Ok(())
//! # }
//! ```

pub mod collect;
pub mod ledger;
pub mod report;
