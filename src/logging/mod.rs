//! Logging and observability
//!
//! Structured logging through `tracing`:
//! - console output at a configurable level
//! - optional JSON log files with daily or hourly rotation
//!
//! # Example
//!
//! ```no_run
//! use salesledger::logging::init_logging;
//! use salesledger::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, parse_log_level, LoggingGuard};

/// Log the completion of a resource collection
///
/// # Example
///
/// ```no_run
/// use salesledger::log_collection_complete;
///
/// log_collection_complete!("sales", 1200, 2);
/// ```
#[macro_export]
macro_rules! log_collection_complete {
    ($resource:expr, $total:expr, $requests:expr) => {
        tracing::info!(
            resource = %$resource,
            total = $total,
            requests = $requests,
            "Collection completed"
        );
    };
}

/// Log the completion of a report run
///
/// # Example
///
/// ```no_run
/// use salesledger::log_report_complete;
/// use std::time::Duration;
///
/// log_report_complete!(42, Duration::from_secs(3));
/// ```
#[macro_export]
macro_rules! log_report_complete {
    ($rows:expr, $duration:expr) => {
        tracing::info!(
            rows = $rows,
            duration_ms = $duration.as_millis() as u64,
            "Report completed"
        );
    };
}
