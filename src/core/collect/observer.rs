//! Collection progress observers
//!
//! The collector reports progress through [`CollectObserver`] instead of
//! logging directly, so the pagination loop itself performs no I/O besides
//! its page requests.

use crate::adapters::retail::ResourceKind;
use crate::domain::EntityId;

/// Receives progress events from a collection run
///
/// All methods default to doing nothing. Implementations must be cheap; they
/// are called inline between page requests.
pub trait CollectObserver: Send + Sync {
    /// A page request is about to be issued
    fn page_requested(&self, _resource: ResourceKind, _after: i64) {}

    /// A page was decoded
    fn page_received(&self, _resource: ResourceKind, _entities: usize, _cursor_max: Option<i64>) {}

    /// An id seen on an earlier page came back on a later one
    fn duplicate_replaced(&self, _resource: ResourceKind, _id: &EntityId) {}

    /// The resource has been fully collected
    fn collection_finished(&self, _resource: ResourceKind, _total: usize, _requests: usize) {}
}

/// Observer that ignores every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl CollectObserver for NoopObserver {}

/// Observer that emits structured `tracing` events
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl CollectObserver for TracingObserver {
    fn page_requested(&self, resource: ResourceKind, after: i64) {
        tracing::debug!(resource = %resource, after = after, "Requesting page");
    }

    fn page_received(&self, resource: ResourceKind, entities: usize, cursor_max: Option<i64>) {
        tracing::debug!(
            resource = %resource,
            entities = entities,
            cursor_max = ?cursor_max,
            "Received page"
        );
    }

    fn duplicate_replaced(&self, resource: ResourceKind, id: &EntityId) {
        tracing::warn!(
            resource = %resource,
            id = %id,
            "Entity changed during collection, keeping latest version"
        );
    }

    fn collection_finished(&self, resource: ResourceKind, total: usize, requests: usize) {
        crate::log_collection_complete!(resource, total, requests);
    }
}
