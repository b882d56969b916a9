// flux-common/src/entity.rs

use std::fmt;

/// A value object tracked by a flux.
///
/// Two snapshots of the same entity share a key. Whether the entity changed
/// between them is decided by `PartialEq`, which must compare every field,
/// nested collections included.
pub trait Entity: Clone + PartialEq + fmt::Debug + Send + Sync + 'static {
    type Key: Ord + Clone + fmt::Debug + fmt::Display + Send + Sync + 'static;

    /// Short lowercase name used in log fields ("account", "order", ...).
    const KIND: &'static str;

    fn key(&self) -> Self::Key;
}
