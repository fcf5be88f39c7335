//! Entity identifier type
//!
//! Every retail resource (sale, customer, product, register, user) is keyed
//! by an opaque string id, usually a UUID.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a retail entity
///
/// References between resources (`sale.customer_id`, `line_item.product_id`,
/// ...) use the same type, so a reference can be looked up directly in an
/// index of the referenced collection.
///
/// # Examples
///
/// ```
/// use salesledger::domain::ids::EntityId;
/// use std::str::FromStr;
///
/// let id = EntityId::from_str("06bf537b-c7d7-11e7-ff13-2f79e7b5f1a1").unwrap();
/// assert_eq!(id.as_str(), "06bf537b-c7d7-11e7-ff13-2f79e7b5f1a1");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Creates a new EntityId, rejecting blank strings
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Entity ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EntityId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
