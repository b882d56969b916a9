// flux/diff.rs

use flux_common::Entity;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    New,
    Updated,
    Removed,
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ChangeKind::New => "NEW",
            ChangeKind::Updated => "UPDATED",
            ChangeKind::Removed => "REMOVED",
        };
        f.write_str(label)
    }
}

/// One entity that differs between two snapshots.
///
/// `entity` is the full new value, or the last known value for `Removed`.
#[derive(Debug, Clone, PartialEq)]
pub struct Change<E> {
    pub kind: ChangeKind,
    pub entity: E,
}

impl<E: Entity> Change<E> {
    pub fn new(kind: ChangeKind, entity: E) -> Self {
        Self { kind, entity }
    }

    pub fn key(&self) -> E::Key {
        self.entity.key()
    }
}

/// Computes the changes between the cached state and a fresh snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiffEngine {
    emit_removals: bool,
}

impl DiffEngine {
    pub fn new(emit_removals: bool) -> Self {
        Self { emit_removals }
    }

    /// New and updated entities in ascending key order, followed by removed
    /// ones (also ascending) when removals are enabled. Unchanged entities
    /// never appear.
    pub fn diff<E: Entity>(
        &self,
        previous: &BTreeMap<E::Key, E>,
        next: &BTreeMap<E::Key, E>,
    ) -> Vec<Change<E>> {
        let mut changes: Vec<Change<E>> = next
            .iter()
            .filter_map(|(key, entity)| match previous.get(key) {
                None => Some(Change::new(ChangeKind::New, entity.clone())),
                Some(known) if known != entity => {
                    Some(Change::new(ChangeKind::Updated, entity.clone()))
                }
                Some(_) => None,
            })
            .collect();

        if self.emit_removals {
            changes.extend(
                previous
                    .iter()
                    .filter(|(key, _)| !next.contains_key(*key))
                    .map(|(_, entity)| Change::new(ChangeKind::Removed, entity.clone())),
            );
        }

        changes
    }
}
