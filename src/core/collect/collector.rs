//! Cursor-paginated collection of a resource
//!
//! Paginated resources are enumerated with a sequence-number cursor rather
//! than offset/limit, so rows are neither skipped nor repeated while the
//! store keeps changing underneath the export:
//!
//! 1. start with `after = 1`
//! 2. request the page after the cursor
//! 3. stop on the first page with no data
//! 4. otherwise append the data, move the cursor to the page's `version.max`
//!    and go back to 2
//!
//! A short page is not treated as the last one; only an empty page ends the
//! enumeration. Single-page resources are fetched once with `after = 0`.

use super::observer::{CollectObserver, NoopObserver};
use crate::adapters::retail::{PageQuery, PageSource, ResourceKind, ResourcePage};
use crate::config::schema::MAX_PAGE_SIZE;
use crate::domain::{DecodeError, Entity, EntityId, FetchError, Result};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::Arc;

/// Cursor of the first page of a paginated resource
pub const FIRST_CURSOR: i64 = 1;

/// Cursor meaning "no filtering", used for single-page resources
pub const UNFILTERED_CURSOR: i64 = 0;

/// Collects complete resource collections from a [`PageSource`]
///
/// Collection is all-or-nothing: any fetch or decode failure aborts the
/// resource and no partial collection is returned, because the ledger joins
/// assume complete reference data.
///
/// # Example
///
/// ```no_run
/// use salesledger::adapters::retail::{ResourceKind, RetailClient};
/// use salesledger::config::{secret_string, ApiConfig};
/// use salesledger::core::collect::{Collector, TracingObserver};
/// use salesledger::domain::Sale;
/// use std::sync::Arc;
///
/// # async fn example() -> salesledger::domain::Result<()> {
/// let config = ApiConfig::new("mystore", secret_string("token".to_string()));
/// let collector = Collector::new(Arc::new(RetailClient::new(&config)?))
///     .with_observer(Arc::new(TracingObserver));
///
/// let sales: Vec<Sale> = collector.collect(ResourceKind::Sales).await?;
/// # Ok(())
/// # }
/// ```
pub struct Collector {
    source: Arc<dyn PageSource>,
    observer: Arc<dyn CollectObserver>,
    page_size: u32,
}

impl Collector {
    /// Create a collector with the maximum page size and no observer
    pub fn new(source: Arc<dyn PageSource>) -> Self {
        Self {
            source,
            observer: Arc::new(NoopObserver),
            page_size: MAX_PAGE_SIZE,
        }
    }

    /// Report progress to `observer`
    pub fn with_observer(mut self, observer: Arc<dyn CollectObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Request pages of `page_size` entities
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Collect every entity of `resource`
    ///
    /// Entities come back in page order. If an id shows up again on a later
    /// page, the later record replaces the earlier one in place, keeping
    /// the collection unique by id.
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::LedgerError::Fetch`] if any page request
    /// fails or the cursor stops advancing (a non-empty page whose
    /// `version.max` equals the requested cursor counts as stalled), and
    /// [`crate::domain::LedgerError::Decode`] if any page cannot be decoded.
    pub async fn collect<T>(&self, resource: ResourceKind) -> Result<Vec<T>>
    where
        T: DeserializeOwned + Entity + Send,
    {
        let mut accumulator = Accumulator::new(resource);
        let mut requests = 0;

        if !resource.is_paginated() {
            let page = self.fetch_decoded::<T>(resource, UNFILTERED_CURSOR).await?;
            requests += 1;
            accumulator.extend(page.data, self.observer.as_ref());
        } else {
            let mut cursor = FIRST_CURSOR;
            loop {
                let page = self.fetch_decoded::<T>(resource, cursor).await?;
                requests += 1;

                if page.is_empty() {
                    break;
                }

                let next = page.cursor_max().ok_or_else(|| DecodeError::MissingCursor {
                    resource: resource.to_string(),
                    cursor,
                })?;

                if next <= cursor {
                    return Err(FetchError::CursorStalled {
                        resource: resource.to_string(),
                        cursor,
                        reported: next,
                    }
                    .into());
                }

                accumulator.extend(page.data, self.observer.as_ref());
                cursor = next;
            }
        }

        let entities = accumulator.into_inner();
        self.observer
            .collection_finished(resource, entities.len(), requests);
        Ok(entities)
    }

    async fn fetch_decoded<T>(&self, resource: ResourceKind, after: i64) -> Result<ResourcePage<T>>
    where
        T: DeserializeOwned,
    {
        self.observer.page_requested(resource, after);

        let query = PageQuery::after(after, self.page_size);
        let body = self.source.fetch_page(resource, &query).await?;

        let page: ResourcePage<T> =
            serde_json::from_str(&body).map_err(|e| DecodeError::InvalidPayload {
                resource: resource.to_string(),
                cursor: after,
                message: e.to_string(),
            })?;

        self.observer
            .page_received(resource, page.data.len(), page.cursor_max());
        Ok(page)
    }
}

/// Ordered, id-unique accumulator owned by a single collection
struct Accumulator<T> {
    resource: ResourceKind,
    entities: Vec<T>,
    positions: HashMap<EntityId, usize>,
}

impl<T: Entity> Accumulator<T> {
    fn new(resource: ResourceKind) -> Self {
        Self {
            resource,
            entities: Vec::new(),
            positions: HashMap::new(),
        }
    }

    fn extend(&mut self, page: Vec<T>, observer: &dyn CollectObserver) {
        for entity in page {
            match self.positions.get(entity.id()) {
                Some(&index) => {
                    observer.duplicate_replaced(self.resource, entity.id());
                    self.entities[index] = entity;
                }
                None => {
                    self.positions
                        .insert(entity.id().clone(), self.entities.len());
                    self.entities.push(entity);
                }
            }
        }
    }

    fn into_inner(self) -> Vec<T> {
        self.entities
    }
}
