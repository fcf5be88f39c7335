//! Sales ledger construction
//!
//! - [`denormalize`] - Joins sales with reference data into flat rows
//! - [`row`] - The 20-column row schema
//! - [`format`] - Amount and note cell formatting
//! - [`timestamp`] - Timezone conversion and date/time split
//! - [`index`] - First-match id lookup

pub mod denormalize;
pub mod format;
pub mod index;
pub mod row;
pub mod timestamp;

pub use denormalize::{
    build_ledger, Denormalizer, Ledger, LedgerStats, DELETED_REGISTER_LABEL, DELETED_SUFFIX,
};
pub use row::{LedgerRow, LineType, COLUMNS, COLUMN_COUNT};
pub use timestamp::SaleStamp;
