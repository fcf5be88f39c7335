//! Retail API adapter
//!
//! This module provides the page-source seam used by the collector, its HTTP
//! implementation and the page envelope models.

pub mod client;
pub mod models;
pub mod source;

pub use client::RetailClient;
pub use models::{ResourcePage, Version};
pub use source::{PageQuery, PageSource, ResourceKind};
