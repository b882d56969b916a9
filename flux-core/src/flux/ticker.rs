// flux/ticker.rs

use async_trait::async_trait;
use flux_common::{CurrencyPair, Ticker};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

use super::errors::FluxError;
use super::fetcher::{Snapshot, SnapshotFetcher};
use super::poller::{Poller, PollerConfig};
use crate::service::MarketService;

/// Tickers for a fixed list of pairs, queried one pair at a time.
///
/// A pair that fails or has no ticker this cycle keeps its last known ticker,
/// so a short outage on one pair never looks like a removal. The fetch only
/// fails when every pair failed, and it reports `Absent` while no pair has
/// ever produced a ticker.
pub struct TickerFetcher {
    market_service: Arc<dyn MarketService>,
    pairs: Vec<CurrencyPair>,
    last_known: Mutex<HashMap<CurrencyPair, Ticker>>,
}

impl TickerFetcher {
    pub fn new(market_service: Arc<dyn MarketService>, pairs: Vec<CurrencyPair>) -> Self {
        Self {
            market_service,
            pairs,
            last_known: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl SnapshotFetcher<Ticker> for TickerFetcher {
    async fn fetch(&self) -> Result<Snapshot<Ticker>, FluxError> {
        let mut fresh = HashMap::with_capacity(self.pairs.len());
        let mut failed = 0;
        let mut last_error = None;

        for pair in &self.pairs {
            match self.market_service.get_ticker(pair).await {
                Ok(Some(ticker)) => {
                    fresh.insert(pair.clone(), ticker);
                }
                Ok(None) => debug!(%pair, "No ticker available"),
                Err(e) => {
                    warn!(%pair, "Ticker request failed: {e}");
                    failed += 1;
                    last_error = Some(e);
                }
            }
        }

        if let Some(e) = last_error {
            if failed == self.pairs.len() {
                return Err(e.into());
            }
        }

        let mut last_known = self
            .last_known
            .lock()
            .map_err(|_| FluxError::FetchFailed("ticker state poisoned".to_string()))?;
        last_known.extend(fresh);

        let tickers: Vec<Ticker> = self
            .pairs
            .iter()
            .filter_map(|pair| last_known.get(pair).cloned())
            .collect();

        if tickers.is_empty() {
            return Ok(Snapshot::Absent);
        }
        Ok(Snapshot::Present(tickers))
    }
}

impl Poller<Ticker> {
    pub fn from_market_service(
        config: PollerConfig,
        market_service: Arc<dyn MarketService>,
        pairs: Vec<CurrencyPair>,
    ) -> Self {
        Poller::new(config, Arc::new(TickerFetcher::new(market_service, pairs)))
    }
}
