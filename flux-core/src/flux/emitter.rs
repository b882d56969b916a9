// flux/emitter.rs

use anyhow::anyhow;
use async_trait::async_trait;
use flux_common::Entity;
use std::marker::PhantomData;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::error;

use super::diff::Change;
use super::errors::FluxError;

/// Downstream consumer of a flux.
///
/// Called once per change, in diff order, before the flux moves on to the
/// next change. Keep it quick: a slow handler stalls its own flux.
#[async_trait]
pub trait FluxHandler<E: Entity>: Send + Sync {
    async fn handle(&self, change: &Change<E>) -> anyhow::Result<()>;
}

/// Forwards every change into a tokio channel.
pub struct ChannelHandler<E> {
    tx: mpsc::UnboundedSender<Change<E>>,
}

impl<E: Entity> ChannelHandler<E> {
    pub fn new(tx: mpsc::UnboundedSender<Change<E>>) -> Self {
        Self { tx }
    }

    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Change<E>>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }
}

#[async_trait]
impl<E: Entity> FluxHandler<E> for ChannelHandler<E> {
    async fn handle(&self, change: &Change<E>) -> anyhow::Result<()> {
        self.tx
            .send(change.clone())
            .map_err(|_| anyhow!("receiver for {} changes dropped", E::KIND))
    }
}

/// Wraps a synchronous closure.
pub struct FnHandler<E, F> {
    f: F,
    _entity: PhantomData<fn(&E)>,
}

impl<E, F> FnHandler<E, F>
where
    E: Entity,
    F: Fn(&Change<E>) -> anyhow::Result<()> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self {
            f,
            _entity: PhantomData,
        }
    }
}

#[async_trait]
impl<E, F> FluxHandler<E> for FnHandler<E, F>
where
    E: Entity,
    F: Fn(&Change<E>) -> anyhow::Result<()> + Send + Sync,
{
    async fn handle(&self, change: &Change<E>) -> anyhow::Result<()> {
        (self.f)(change)
    }
}

/// Fans a change out to every registered handler.
pub struct Emitter<E: Entity> {
    flux: String,
    handlers: Vec<Arc<dyn FluxHandler<E>>>,
}

impl<E: Entity> Emitter<E> {
    pub fn new(flux: impl Into<String>) -> Self {
        Self {
            flux: flux.into(),
            handlers: Vec::new(),
        }
    }

    pub fn register(&mut self, handler: Arc<dyn FluxHandler<E>>) {
        self.handlers.push(handler);
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Delivers to all handlers in registration order and returns how many
    /// of them failed. A failing handler does not stop the others.
    pub async fn emit(&self, change: &Change<E>) -> usize {
        let mut failures = 0;

        for handler in &self.handlers {
            if let Err(e) = handler.handle(change).await {
                failures += 1;
                let err = FluxError::EmissionFailed {
                    key: change.key().to_string(),
                    reason: format!("{e:#}"),
                };
                error!(flux = %self.flux, kind = %change.kind, "{err}");
            }
        }

        failures
    }
}
