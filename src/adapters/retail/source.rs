//! Page source trait definition
//!
//! The collector only needs "give me the page after this cursor". This seam
//! keeps the HTTP transport (auth headers, TLS, retries) out of the
//! collection algorithm and lets tests feed canned pages.

use crate::domain::FetchError;
use async_trait::async_trait;
use std::fmt;

/// Retail resource collections the ledger is built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Sales,
    Customers,
    Products,
    Registers,
    Users,
}

impl ResourceKind {
    /// Every resource a report needs
    pub const ALL: [ResourceKind; 5] = [
        ResourceKind::Sales,
        ResourceKind::Customers,
        ResourceKind::Products,
        ResourceKind::Registers,
        ResourceKind::Users,
    ];

    /// URL path segment of the resource
    pub fn path(&self) -> &'static str {
        match self {
            ResourceKind::Sales => "sales",
            ResourceKind::Customers => "customers",
            ResourceKind::Products => "products",
            ResourceKind::Registers => "registers",
            ResourceKind::Users => "users",
        }
    }

    /// Whether the resource is enumerated with a cursor
    ///
    /// Registers and users are small enough to come back in a single page.
    pub fn is_paginated(&self) -> bool {
        matches!(
            self,
            ResourceKind::Sales | ResourceKind::Customers | ResourceKind::Products
        )
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Query parameters of a single page request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    /// Return entities with a version greater than this; 0 disables the filter
    pub after: i64,

    /// Maximum entities per page
    pub page_size: u32,

    /// Include soft-deleted entities
    pub include_deleted: bool,
}

impl PageQuery {
    /// Query for the page after `after`, excluding deleted entities
    pub fn after(after: i64, page_size: u32) -> Self {
        Self {
            after,
            page_size,
            include_deleted: false,
        }
    }

    /// Query string pairs, in key order
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("after", self.after.to_string()),
            ("deleted", self.include_deleted.to_string()),
            ("page_size", self.page_size.to_string()),
        ]
    }
}

/// Source of raw resource pages
///
/// Implementations perform one request per call and return the undecoded
/// response body. Decoding is left to the caller so that transport failures
/// ([`FetchError`]) stay distinct from payload failures.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch one page of `resource`
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] if the request cannot be completed or the
    /// server answers with a non-success status.
    async fn fetch_page(
        &self,
        resource: ResourceKind,
        query: &PageQuery,
    ) -> std::result::Result<String, FetchError>;
}
