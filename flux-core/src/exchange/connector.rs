// ====
// Hyperliquid Info Connector
// ====
// Read-only access to the public /info endpoint for one wallet.
// No signing, no external Hyperliquid SDKs
// ====

use async_trait::async_trait;
use flux_common::{CurrencyPair, Order, Ticker, User};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::debug;

use super::types::{ClearinghouseState, L2Snapshot, OpenOrder, SpotClearinghouseState};
use super::utils::{coin_for_pair, validate_address};
use crate::service::{MarketService, ServiceError, TradeService, UserService};

/// Hyperliquid API Endpoints
const MAINNET_API: &str = "https://api.hyperliquid.xyz";
const TESTNET_API: &str = "https://api.hyperliquid-testnet.xyz";

/// Hyperliquid info client
///
/// Implements the upstream services of all three fluxes for a wallet address.
pub struct HyperliquidInfoClient {
    /// HTTP client
    client: Client,
    /// API base URL
    base_url: String,
    /// Tracked wallet
    address: String,
}

impl HyperliquidInfoClient {
    /// Create new client
    ///
    /// Example:
    /// ```no_run
    /// # use flux_core::exchange::HyperliquidInfoClient;
    /// let client = HyperliquidInfoClient::new("0x0000000000000000000000000000000000000001", true)?; // Testnet
    /// # Ok::<(), flux_core::service::ServiceError>(())
    /// ```
    pub fn new(address: &str, is_testnet: bool) -> Result<Self, ServiceError> {
        let base_url = if is_testnet { TESTNET_API } else { MAINNET_API };
        Self::with_base_url(address, base_url)
    }

    pub fn with_base_url(address: &str, base_url: &str) -> Result<Self, ServiceError> {
        let address = validate_address(address)?;
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            address,
        })
    }

    /// Get wallet address
    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn info<T: DeserializeOwned>(&self, request: Value) -> Result<T, ServiceError> {
        let url = format!("{}/info", self.base_url);
        debug!(%url, request = %request, "Info request");

        let body = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        Ok(serde_json::from_slice(&body)?)
    }

    // ====================================================================
    // ACCOUNT
    // ====================================================================

    pub async fn get_spot_state(&self) -> Result<SpotClearinghouseState, ServiceError> {
        self.info(json!({
            "type": "spotClearinghouseState",
            "user": self.address
        }))
        .await
    }

    pub async fn get_perp_state(&self) -> Result<ClearinghouseState, ServiceError> {
        self.info(json!({
            "type": "clearinghouseState",
            "user": self.address
        }))
        .await
    }

    // ====================================================================
    // ORDERS
    // ====================================================================

    pub async fn get_open_orders(&self) -> Result<Vec<OpenOrder>, ServiceError> {
        self.info(json!({
            "type": "frontendOpenOrders",
            "user": self.address
        }))
        .await
    }

    // ====================================================================
    // MARKET DATA
    // ====================================================================

    /// Get orderbook (L2). Unknown coins answer `null`.
    pub async fn get_orderbook(&self, coin: &str) -> Result<Option<L2Snapshot>, ServiceError> {
        self.info(json!({
            "type": "l2Book",
            "coin": coin
        }))
        .await
    }
}

#[async_trait]
impl UserService for HyperliquidInfoClient {
    async fn get_user(&self) -> Result<Option<User>, ServiceError> {
        let (spot, perp) = tokio::try_join!(self.get_spot_state(), self.get_perp_state())?;

        let user = User::new(self.address.clone())
            .with_account(spot.into_account()?)
            .with_account(perp.into_account()?);
        Ok(Some(user))
    }
}

#[async_trait]
impl TradeService for HyperliquidInfoClient {
    async fn get_orders(&self) -> Result<Option<Vec<Order>>, ServiceError> {
        let orders = self
            .get_open_orders()
            .await?
            .into_iter()
            .map(OpenOrder::into_order)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Some(orders))
    }
}

#[async_trait]
impl MarketService for HyperliquidInfoClient {
    async fn get_ticker(&self, pair: &CurrencyPair) -> Result<Option<Ticker>, ServiceError> {
        match self.get_orderbook(&coin_for_pair(pair)).await? {
            Some(book) => book.into_ticker(pair.clone()),
            None => Ok(None),
        }
    }
}
