//! External system integrations for Salesledger.
//!
//! - [`retail`] - Paginated retail API (sales, customers, products, registers, users)
//!
//! # Design Pattern
//!
//! Adapters isolate external dependencies behind traits so the core can be
//! tested with in-memory implementations. The collector depends only on
//! [`retail::PageSource`]; [`retail::RetailClient`] is the HTTP implementation.
//!
//! ```rust,no_run
//! use salesledger::adapters::retail::RetailClient;
//! use salesledger::config::{secret_string, ApiConfig};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ApiConfig::new("mystore", secret_string("token".to_string()));
//! let client = RetailClient::new(&config)?;
//! # Ok(())
//! # }
//! ```

pub mod retail;
