//! Common behaviour of collected resources

use super::ids::EntityId;

/// A record collected from a retail resource
///
/// Collections are unique by [`Entity::id`] once fully collected.
pub trait Entity {
    /// The record's unique id within its resource
    fn id(&self) -> &EntityId;
}
