//! Domain models and types for Salesledger.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Identifiers** ([`EntityId`]) shared by records and the references between them
//! - **Retail records** ([`Sale`], [`LineItem`], [`Payment`], [`Customer`],
//!   [`Product`], [`Register`], [`User`])
//! - **Error types** ([`LedgerError`], [`FetchError`], [`DecodeError`])
//! - **Result type alias** ([`Result`])
//!
//! Optional upstream fields are modelled as `Option`. An absent value is never
//! collapsed to zero or an empty string at this layer; the ledger decides how
//! each absence is rendered.
//!
//! ```rust
//! use salesledger::domain::Sale;
//!
//! let sale: Sale = serde_json::from_str(r#"{"id": "s-1", "status": "CLOSED"}"#).unwrap();
//! assert_eq!(sale.customer_id, None);
//! assert!(sale.line_items.is_empty());
//! ```

pub mod entity;
pub mod errors;
pub mod ids;
pub mod reference;
pub mod result;
pub mod sale;

// Re-export commonly used types for convenience
pub use entity::Entity;
pub use errors::{DecodeError, FetchError, LedgerError};
pub use ids::EntityId;
pub use reference::{Customer, Product, Register, User};
pub use result::Result;
pub use sale::{LineItem, Payment, Sale};
