// flux-core/src/flux/mod.rs

pub mod account;
pub mod cache;
pub mod diff;
pub mod emitter;
pub mod errors;
pub mod fetcher;
pub mod order;
pub mod poller;
pub mod scheduler;
pub mod ticker;

#[cfg(test)]
pub(crate) mod test_support;

pub use account::AccountFetcher;
pub use cache::StateCache;
pub use diff::{Change, ChangeKind, DiffEngine};
pub use emitter::{ChannelHandler, Emitter, FluxHandler, FnHandler};
pub use errors::FluxError;
pub use fetcher::{Snapshot, SnapshotFetcher};
pub use order::OrderFetcher;
pub use poller::{CycleOutcome, Poller, PollerConfig};
pub use scheduler::{Scheduler, SchedulerState};
pub use ticker::TickerFetcher;

use flux_common::{Account, Order, Ticker};

pub type AccountFlux = Poller<Account>;
pub type OrderFlux = Poller<Order>;
pub type TickerFlux = Poller<Ticker>;
