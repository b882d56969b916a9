// flux/fetcher.rs

use async_trait::async_trait;
use flux_common::Entity;
use std::collections::BTreeMap;
use tracing::warn;

use super::errors::FluxError;

/// Result of one fetch.
///
/// `Absent` is not the same as an empty `Present`: the former means the
/// upstream had nothing usable this cycle, the latter that every entity is gone.
#[derive(Debug, Clone, PartialEq)]
pub enum Snapshot<E> {
    Present(Vec<E>),
    Absent,
}

impl<E: Entity> Snapshot<E> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Snapshot::Absent)
    }
}

impl<E> From<Option<Vec<E>>> for Snapshot<E> {
    fn from(entities: Option<Vec<E>>) -> Self {
        match entities {
            Some(entities) => Snapshot::Present(entities),
            None => Snapshot::Absent,
        }
    }
}

/// Supplies the complete current state of one entity type.
#[async_trait]
pub trait SnapshotFetcher<E: Entity>: Send + Sync {
    async fn fetch(&self) -> Result<Snapshot<E>, FluxError>;
}

/// Indexes a snapshot by entity key. On duplicate keys the later entity wins.
pub fn index_snapshot<E: Entity>(flux: &str, entities: Vec<E>) -> BTreeMap<E::Key, E> {
    let mut index = BTreeMap::new();
    for entity in entities {
        if let Some(previous) = index.insert(entity.key(), entity) {
            warn!(
                flux = %flux,
                key = %previous.key(),
                "Duplicate {} in snapshot, keeping the last one",
                E::KIND
            );
        }
    }
    index
}
