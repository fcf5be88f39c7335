//! Ledger row schema
//!
//! Every row has the same 20 cells in a fixed order. A sale produces one
//! [`LineType::Sale`] row, then one [`LineType::SaleLine`] row per line item,
//! then one [`LineType::Payment`] row per payment.

use super::timestamp::SaleStamp;
use std::fmt;

/// Number of cells in every row
pub const COLUMN_COUNT: usize = 20;

/// Header row, in cell order
pub const COLUMNS: [&str; COLUMN_COUNT] = [
    "Sale Date",
    "Sale Time",
    "Invoice Number",
    "Line Type",
    "Customer Code",
    "Company Name",
    "Customer Name",
    "Sale Note",
    "Quantity",
    "Price",
    "Tax",
    "Discount",
    "Loyalty",
    "Total",
    "Paid",
    "Details",
    "Register",
    "User",
    "Status",
    "Product SKU",
];

/// Kind of ledger row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineType {
    /// Sale header with totals
    #[default]
    Sale,
    /// One product line
    SaleLine,
    /// One payment
    Payment,
}

impl LineType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineType::Sale => "Sale",
            LineType::SaleLine => "Sale Line",
            LineType::Payment => "Payment",
        }
    }
}

impl fmt::Display for LineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One flat ledger row; every cell is already formatted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerRow {
    pub sale_date: String,
    pub sale_time: String,
    pub invoice_number: String,
    pub line_type: LineType,
    pub customer_code: String,
    pub company_name: String,
    pub customer_name: String,
    pub sale_note: String,
    pub quantity: String,
    pub price: String,
    pub tax: String,
    pub discount: String,
    pub loyalty: String,
    pub total: String,
    pub paid: String,
    pub details: String,
    pub register: String,
    pub user: String,
    pub status: String,
    pub product_sku: String,
}

impl LedgerRow {
    /// A row of `line_type` carrying the sale's date and time, other cells empty
    ///
    /// Row kinds fill in their own cells with struct update syntax, so each
    /// row is built independently from the sale-level values it shares:
    ///
    /// ```
    /// use salesledger::core::ledger::row::{LedgerRow, LineType};
    /// use salesledger::core::ledger::timestamp::SaleStamp;
    ///
    /// let stamp = SaleStamp { date: "2020-01-02".into(), time: "03:04:05".into() };
    /// let row = LedgerRow {
    ///     paid: "11".into(),
    ///     details: "Cash".into(),
    ///     ..LedgerRow::stamped(LineType::Payment, &stamp)
    /// };
    /// assert_eq!(row.cells()[0], "2020-01-02");
    /// assert_eq!(row.cells()[3], "Payment");
    /// ```
    pub fn stamped(line_type: LineType, stamp: &SaleStamp) -> Self {
        Self {
            sale_date: stamp.date.clone(),
            sale_time: stamp.time.clone(),
            line_type,
            ..Default::default()
        }
    }

    /// Cells in [`COLUMNS`] order
    pub fn cells(&self) -> [&str; COLUMN_COUNT] {
        [
            &self.sale_date,
            &self.sale_time,
            &self.invoice_number,
            self.line_type.as_str(),
            &self.customer_code,
            &self.company_name,
            &self.customer_name,
            &self.sale_note,
            &self.quantity,
            &self.price,
            &self.tax,
            &self.discount,
            &self.loyalty,
            &self.total,
            &self.paid,
            &self.details,
            &self.register,
            &self.user,
            &self.status,
            &self.product_sku,
        ]
    }
}
