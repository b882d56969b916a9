// service/mod.rs
// Upstream contracts the fluxes poll. `Ok(None)` means "nothing usable this
// cycle" and leaves the flux state untouched.

pub mod errors;

use async_trait::async_trait;
use flux_common::{CurrencyPair, Order, Ticker, User};

pub use errors::ServiceError;

#[async_trait]
pub trait UserService: Send + Sync {
    /// Current user with all of its accounts and balances
    async fn get_user(&self) -> Result<Option<User>, ServiceError>;
}

#[async_trait]
pub trait TradeService: Send + Sync {
    /// Every order the exchange currently reports
    async fn get_orders(&self) -> Result<Option<Vec<Order>>, ServiceError>;
}

#[async_trait]
pub trait MarketService: Send + Sync {
    /// Latest ticker for one pair
    async fn get_ticker(&self, pair: &CurrencyPair) -> Result<Option<Ticker>, ServiceError>;
}
