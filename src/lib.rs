// Salesledger - Retail sales history exporter
// Copyright (c) 2025 Salesledger Contributors
// Licensed under the MIT License

//! # Salesledger - Retail sales history exporter
//!
//! Salesledger pages through a retail point-of-sale API and flattens its
//! sales, with their customers, products, registers and users, into a single
//! CSV ledger.
//!
//! ## Overview
//!
//! - **Collecting** every sale, customer and product with sequence-number
//!   cursor pagination, plus registers and users in a single request each
//! - **Filtering** deleted and parked (OPEN) sales
//! - **Denormalizing** each sale into a header row, line-item rows and
//!   payment rows, with dates converted to the store's timezone
//! - **Writing** the ledger as CSV
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (collection, ledger, report orchestration)
//! - [`adapters`] - External integrations (retail HTTP API)
//! - [`domain`] - Entity models, identifiers and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use salesledger::config::load_config;
//! use salesledger::core::report::ReportCoordinator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("salesledger.toml")?;
//!     let coordinator = ReportCoordinator::new(config)?;
//!
//!     let summary = coordinator.execute_report().await?;
//!     println!("Wrote {} rows", summary.rows());
//!     Ok(())
//! }
//! ```
//!
//! ## Building a ledger directly
//!
//! The denormalizer is a pure function of already collected data:
//!
//! ```rust
//! use salesledger::core::ledger::build_ledger;
//! use salesledger::domain::{EntityId, Payment, Sale};
//!
//! let sale = Sale {
//!     id: EntityId::from("1"),
//!     status: Some("CLOSED".to_string()),
//!     payments: vec![Payment { name: Some("Cash".to_string()), amount: Some(11.0) }],
//!     ..Default::default()
//! };
//!
//! let rows = build_ledger(&[sale], &[], &[], &[], &[], chrono_tz::UTC);
//! assert_eq!(rows.len(), 2);
//! assert_eq!(rows[1].paid, "11");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
