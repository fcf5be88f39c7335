//! Reference collections joined onto sales
//!
//! Customers, products, registers and users are fetched independently of
//! sales and looked up by id while building the ledger.

use super::entity::Entity;
use super::ids::EntityId;
use serde::{Deserialize, Serialize};

/// A customer record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: EntityId,

    #[serde(default)]
    pub first_name: Option<String>,

    #[serde(default)]
    pub last_name: Option<String>,

    /// Customer code shown on receipts
    #[serde(default)]
    pub code: Option<String>,

    #[serde(default)]
    pub company_name: Option<String>,

    #[serde(default)]
    pub deleted_at: Option<String>,
}

impl Customer {
    /// First and last name joined by a space, skipping absent parts
    ///
    /// # Examples
    ///
    /// ```
    /// use salesledger::domain::Customer;
    ///
    /// let customer = Customer {
    ///     first_name: Some("Ann".to_string()),
    ///     ..Default::default()
    /// };
    /// assert_eq!(customer.full_name(), "Ann");
    /// ```
    pub fn full_name(&self) -> String {
        [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Entity for Customer {
    fn id(&self) -> &EntityId {
        &self.id
    }
}

/// A product (or product variant) record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: EntityId,

    /// Base product name
    #[serde(default)]
    pub name: Option<String>,

    /// Name including the variant, e.g. "Shirt / Large"
    #[serde(default)]
    pub variant_name: Option<String>,

    #[serde(default)]
    pub sku: Option<String>,

    #[serde(default)]
    pub deleted_at: Option<String>,
}

impl Entity for Product {
    fn id(&self) -> &EntityId {
        &self.id
    }
}

/// A register (till) record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Register {
    pub id: EntityId,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub deleted_at: Option<String>,
}

impl Register {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

impl Entity for Register {
    fn id(&self) -> &EntityId {
        &self.id
    }
}

/// A staff user record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: EntityId,

    #[serde(default)]
    pub display_name: Option<String>,

    #[serde(default)]
    pub deleted_at: Option<String>,
}

impl Entity for User {
    fn id(&self) -> &EntityId {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer(first: Option<&str>, last: Option<&str>) -> Customer {
        Customer {
            id: EntityId::from("c"),
            first_name: first.map(str::to_string),
            last_name: last.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_full_name_joins_present_parts() {
        assert_eq!(customer(Some("Ann"), Some("Lee")).full_name(), "Ann Lee");
        assert_eq!(customer(None, Some("Lee")).full_name(), "Lee");
        assert_eq!(customer(None, None).full_name(), "");
    }

    #[test]
    fn test_empty_first_name_is_kept_as_present() {
        // Present-but-empty still counts as a part.
        assert_eq!(customer(Some(""), Some("Lee")).full_name(), " Lee");
    }

    #[test]
    fn test_register_deserializes_deleted_marker() {
        let register: Register = serde_json::from_str(
            r#"{"id":"r1","name":"Front","deleted_at":"2019-04-01T00:00:00+00:00"}"#,
        )
        .unwrap();
        assert!(register.is_deleted());
        assert_eq!(register.name.as_deref(), Some("Front"));
    }
}
