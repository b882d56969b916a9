// flux-core/src/lib.rs
// Flux engine: polls exchange state, diffs it against the last snapshot and
// hands every new or changed entity to downstream handlers.

pub mod config;
pub mod exchange;
pub mod flux;
pub mod persistence;
pub mod service;

// Re-export flux-common for convenience
pub use flux_common::{dto, entity, Entity};
