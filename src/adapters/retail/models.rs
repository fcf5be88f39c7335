//! Retail API wire models
//!
//! Every collection endpoint answers with the same envelope:
//!
//! ```json
//! { "data": [ ... ], "version": { "min": 1, "max": 2048 } }
//! ```
//!
//! `version.max` is the highest entity sequence number in the page and is
//! the `after` cursor of the next request. Empty pages may carry a null or
//! missing version.

use serde::{Deserialize, Serialize};

/// One decoded page of a resource collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourcePage<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,

    #[serde(default)]
    pub version: Option<Version>,
}

impl<T> ResourcePage<T> {
    /// Highest sequence number reported by the page, if any
    pub fn cursor_max(&self) -> Option<i64> {
        self.version.as_ref().and_then(|v| v.max)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Sequence number range of a page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    #[serde(default)]
    pub min: Option<i64>,

    #[serde(default)]
    pub max: Option<i64>,
}
