//! Report orchestration
//!
//! - [`coordinator`] - Parallel collection, ledger build and output
//! - [`writer`] - CSV encoding of ledger rows
//! - [`summary`] - Counters and timing of a run

pub mod coordinator;
pub mod summary;
pub mod writer;

pub use coordinator::ReportCoordinator;
pub use summary::{CollectedCounts, ReportSummary};
pub use writer::{report_file_name, write_report_file, LedgerWriter};
