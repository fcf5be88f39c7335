//! Id lookup over a reference collection

use crate::domain::{Entity, EntityId};
use std::collections::HashMap;

/// Borrowed index from id to entity, built once per collection
///
/// If a collection holds the same id twice, the first occurrence wins,
/// exactly as a front-to-back scan that stops at the first match would.
#[derive(Debug)]
pub struct EntityIndex<'a, T> {
    by_id: HashMap<&'a EntityId, &'a T>,
}

impl<'a, T: Entity> EntityIndex<'a, T> {
    pub fn new(entities: &'a [T]) -> Self {
        let mut by_id = HashMap::with_capacity(entities.len());
        for entity in entities {
            by_id.entry(entity.id()).or_insert(entity);
        }
        Self { by_id }
    }

    /// Look up an optional reference; an absent reference never matches
    pub fn resolve(&self, id: Option<&EntityId>) -> Option<&'a T> {
        id.and_then(|id| self.by_id.get(id).copied())
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
