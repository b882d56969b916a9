// flux/test_support.rs
// Scripted collaborators shared by the flux tests.

use async_trait::async_trait;
use flux_common::{Balance, Currency, Entity};
use rust_decimal::Decimal;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::mpsc;

use super::diff::{Change, ChangeKind};
use super::errors::FluxError;
use super::fetcher::{Snapshot, SnapshotFetcher};

/// Replays a fixed sequence of fetch results, then reports `Absent` forever.
pub(crate) struct ScriptedFetcher<E> {
    script: Mutex<VecDeque<Result<Snapshot<E>, FluxError>>>,
    calls: AtomicUsize,
}

impl<E: Entity> ScriptedFetcher<E> {
    pub(crate) fn new(script: Vec<Result<Snapshot<E>, FluxError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<E: Entity> SnapshotFetcher<E> for ScriptedFetcher<E> {
    async fn fetch(&self) -> Result<Snapshot<E>, FluxError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.script.lock().unwrap().pop_front();
        next.unwrap_or(Ok(Snapshot::Absent))
    }
}

/// Balance with all seven amounts set to `amount`.
pub(crate) fn uniform_balance(currency: Currency, amount: Decimal) -> Balance {
    Balance {
        total: amount,
        available: amount,
        frozen: amount,
        loaned: amount,
        borrowed: amount,
        withdrawing: amount,
        depositing: amount,
        ..Balance::zero(currency)
    }
}

/// Everything emitted so far, as (kind, key) pairs.
pub(crate) fn drain<E: Entity>(rx: &mut mpsc::UnboundedReceiver<Change<E>>) -> Vec<(ChangeKind, String)> {
    let mut received = Vec::new();
    while let Ok(change) = rx.try_recv() {
        received.push((change.kind, change.key().to_string()));
    }
    received
}
