// flux/cache.rs

use flux_common::Entity;
use std::collections::BTreeMap;

/// Last applied snapshot of one flux, keyed by entity key.
///
/// Only ever swapped as a whole, so it always equals some complete snapshot.
#[derive(Debug, Clone)]
pub struct StateCache<E: Entity> {
    entries: BTreeMap<E::Key, E>,
}

impl<E: Entity> StateCache<E> {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Cache pre-populated with entities known from an earlier run.
    pub fn seeded(entities: impl IntoIterator<Item = E>) -> Self {
        Self {
            entries: entities.into_iter().map(|e| (e.key(), e)).collect(),
        }
    }

    pub fn get(&self) -> &BTreeMap<E::Key, E> {
        &self.entries
    }

    pub fn get_entry(&self, key: &E::Key) -> Option<&E> {
        self.entries.get(key)
    }

    /// Swaps in a new state and hands back the previous one.
    pub fn replace(&mut self, entries: BTreeMap<E::Key, E>) -> BTreeMap<E::Key, E> {
        std::mem::replace(&mut self.entries, entries)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<E: Entity> Default for StateCache<E> {
    fn default() -> Self {
        Self::new()
    }
}
