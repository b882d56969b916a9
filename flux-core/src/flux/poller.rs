// flux/poller.rs

use flux_common::Entity;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use super::cache::StateCache;
use super::diff::DiffEngine;
use super::emitter::{Emitter, FluxHandler};
use super::errors::FluxError;
use super::fetcher::{index_snapshot, Snapshot, SnapshotFetcher};

#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// Used in log fields
    pub name: String,
    pub interval: Duration,
    /// Report entities that disappeared from a snapshot as `Removed`
    pub emit_removals: bool,
}

impl PollerConfig {
    pub fn new(name: impl Into<String>, interval: Duration) -> Self {
        Self {
            name: name.into(),
            interval,
            emit_removals: false,
        }
    }

    pub fn with_removals(mut self, emit_removals: bool) -> Self {
        self.emit_removals = emit_removals;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Nothing fetched; state and handlers untouched
    Skipped,
    /// Snapshot applied to the cache
    Applied { emitted: usize, failures: usize },
}

/// One flux: fetches snapshots of `E`, emits what changed and remembers the
/// last applied snapshot.
pub struct Poller<E: Entity> {
    config: PollerConfig,
    fetcher: Arc<dyn SnapshotFetcher<E>>,
    cache: StateCache<E>,
    diff: DiffEngine,
    emitter: Emitter<E>,
}

impl<E: Entity> Poller<E> {
    pub fn new(config: PollerConfig, fetcher: Arc<dyn SnapshotFetcher<E>>) -> Self {
        let diff = DiffEngine::new(config.emit_removals);
        let emitter = Emitter::new(config.name.clone());

        Self {
            config,
            fetcher,
            cache: StateCache::new(),
            diff,
            emitter,
        }
    }

    /// Starts from a known state instead of an empty cache.
    pub fn with_initial_state(mut self, entities: impl IntoIterator<Item = E>) -> Self {
        self.cache = StateCache::seeded(entities);
        self
    }

    pub fn register(&mut self, handler: Arc<dyn FluxHandler<E>>) -> &mut Self {
        self.emitter.register(handler);
        self
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn config(&self) -> &PollerConfig {
        &self.config
    }

    pub fn cache(&self) -> &StateCache<E> {
        &self.cache
    }

    /// Runs a single fetch / diff / emit / replace cycle.
    ///
    /// Never fails: fetch errors are logged and the cycle is skipped, handler
    /// errors are logged and the snapshot is still applied.
    pub async fn poll_once(&mut self) -> CycleOutcome {
        let entities = match self.fetcher.fetch().await {
            Ok(Snapshot::Present(entities)) => entities,
            Ok(Snapshot::Absent) => {
                debug!(flux = %self.config.name, "No {} snapshot this cycle", E::KIND);
                return CycleOutcome::Skipped;
            }
            Err(e @ FluxError::FetchUnavailable(_)) => {
                warn!(flux = %self.config.name, "Skipping cycle: {e}");
                return CycleOutcome::Skipped;
            }
            Err(e) => {
                error!(flux = %self.config.name, "Skipping cycle: {e}");
                return CycleOutcome::Skipped;
            }
        };

        let next = index_snapshot(&self.config.name, entities);
        let changes = self.diff.diff(self.cache.get(), &next);

        let mut failures = 0;
        for change in &changes {
            debug!(
                flux = %self.config.name,
                key = %change.key(),
                kind = %change.kind,
                "Emitting {}",
                E::KIND
            );
            failures += self.emitter.emit(change).await;
        }

        let size = next.len();
        self.cache.replace(next);

        if changes.is_empty() {
            debug!(flux = %self.config.name, size, "Snapshot unchanged");
        } else {
            info!(
                flux = %self.config.name,
                changes = changes.len(),
                failures,
                size,
                "Snapshot applied"
            );
        }

        CycleOutcome::Applied {
            emitted: changes.len(),
            failures,
        }
    }
}
