//! Sale domain model
//!
//! A sale embeds its line items and payments. Every optional field is an
//! `Option` so that an absent value is never confused with zero or an empty
//! string.

use super::entity::Entity;
use super::ids::EntityId;
use serde::{Deserialize, Deserializer, Serialize};

/// Status of a parked, unfinished sale
pub const STATUS_OPEN: &str = "OPEN";

/// A sale as returned by the `sales` resource
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub id: EntityId,

    #[serde(default)]
    pub invoice_number: Option<String>,

    /// e.g. "OPEN", "CLOSED", "ONACCOUNT"
    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub customer_id: Option<EntityId>,

    #[serde(default)]
    pub register_id: Option<EntityId>,

    #[serde(default)]
    pub user_id: Option<EntityId>,

    /// Vendor-formatted timestamp, UTC
    #[serde(default)]
    pub sale_date: Option<String>,

    #[serde(default)]
    pub note: Option<String>,

    #[serde(default)]
    pub total_price: Option<f64>,

    #[serde(default)]
    pub total_tax: Option<f64>,

    #[serde(default)]
    pub total_loyalty: Option<f64>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub line_items: Vec<LineItem>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub payments: Vec<Payment>,

    /// Set when the sale was voided/deleted
    #[serde(default)]
    pub deleted_at: Option<String>,
}

impl Sale {
    /// Whether the sale carries a deletion marker
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Whether the sale is parked (status "OPEN")
    pub fn is_open(&self) -> bool {
        self.status.as_deref() == Some(STATUS_OPEN)
    }
}

impl Entity for Sale {
    fn id(&self) -> &EntityId {
        &self.id
    }
}

/// Decode a JSON `null` array as an empty `Vec`
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// One product line within a sale
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(default)]
    pub product_id: Option<EntityId>,

    #[serde(default)]
    pub quantity: Option<f64>,

    /// Unit price excluding tax
    #[serde(default)]
    pub price: Option<f64>,

    /// Unit tax
    #[serde(default)]
    pub tax: Option<f64>,

    /// Unit discount
    #[serde(default)]
    pub discount: Option<f64>,

    /// Discount across the whole line
    #[serde(default)]
    pub discount_total: Option<f64>,

    #[serde(default)]
    pub loyalty_value: Option<f64>,
}

/// One payment applied to a sale
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    /// Payment type name, e.g. "Cash"
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub amount: Option<f64>,
}
