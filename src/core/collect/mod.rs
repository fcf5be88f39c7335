//! Paginated collection of retail resources
//!
//! - [`collector`] - Cursor pagination loop and id-unique accumulation
//! - [`observer`] - Progress callbacks injected into the collector

pub mod collector;
pub mod observer;

pub use collector::{Collector, FIRST_CURSOR, UNFILTERED_CURSOR};
pub use observer::{CollectObserver, NoopObserver, TracingObserver};
