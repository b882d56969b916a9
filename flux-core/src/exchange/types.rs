// exchange/types.rs
// Info endpoint payloads and their mapping onto flux value objects.

use flux_common::{Account, Balance, Currency, CurrencyPair, Order, OrderStatus, OrderType, Ticker};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::utils::{pair_for_coin, parse_decimal, parse_millis, PERP_QUOTE};
use crate::service::ServiceError;

pub const SPOT_ACCOUNT: &str = "spot";
pub const PERP_ACCOUNT: &str = "perp";

// --------------------------------------------------------------------
// l2Book
// --------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct L2Snapshot {
    pub coin: String,
    pub time: u64,
    pub levels: Vec<Vec<LevelData>>, // [bids, asks]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelData {
    pub px: String,
    pub sz: String,
    pub n: u32,
}

impl L2Snapshot {
    fn best(&self, side: usize) -> Result<Option<(Decimal, Decimal)>, ServiceError> {
        match self.levels.get(side).and_then(|levels| levels.first()) {
            Some(level) => Ok(Some((
                parse_decimal("px", &level.px)?,
                parse_decimal("sz", &level.sz)?,
            ))),
            None => Ok(None),
        }
    }

    /// Top of book as a ticker. `last` is the mid price, or the only side
    /// quoted. An empty book yields no ticker.
    pub fn into_ticker(self, pair: CurrencyPair) -> Result<Option<Ticker>, ServiceError> {
        let bid = self.best(0)?;
        let ask = self.best(1)?;

        let last = match (bid, ask) {
            (Some((bid, _)), Some((ask, _))) => (bid + ask) / Decimal::TWO,
            (Some((px, _)), None) | (None, Some((px, _))) => px,
            (None, None) => return Ok(None),
        };

        let mut ticker = Ticker::new(pair, last, parse_millis("time", self.time)?);
        ticker.bid = bid.map(|(px, _)| px);
        ticker.bid_size = bid.map(|(_, sz)| sz);
        ticker.ask = ask.map(|(px, _)| px);
        ticker.ask_size = ask.map(|(_, sz)| sz);
        Ok(Some(ticker))
    }
}

// --------------------------------------------------------------------
// spotClearinghouseState
// --------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotClearinghouseState {
    pub balances: Vec<SpotBalance>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotBalance {
    pub coin: String,
    pub hold: String,
    pub total: String,
}

impl SpotClearinghouseState {
    pub fn into_account(self) -> Result<Account, ServiceError> {
        self.balances
            .into_iter()
            .try_fold(Account::new(SPOT_ACCOUNT, "Spot"), |account, balance| {
                let total = parse_decimal("total", &balance.total)?;
                let hold = parse_decimal("hold", &balance.hold)?;
                Ok(account.with_balance(Balance {
                    total,
                    available: total - hold,
                    frozen: hold,
                    ..Balance::zero(Currency::new(&balance.coin))
                }))
            })
    }
}

// --------------------------------------------------------------------
// clearinghouseState
// --------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClearinghouseState {
    #[serde(rename = "marginSummary")]
    pub margin_summary: MarginSummary,
    pub withdrawable: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarginSummary {
    #[serde(rename = "accountValue")]
    pub account_value: String,
    #[serde(rename = "totalMarginUsed")]
    pub total_margin_used: String,
}

impl ClearinghouseState {
    /// Perp margin as a single USDC balance.
    pub fn into_account(self) -> Result<Account, ServiceError> {
        let balance = Balance {
            total: parse_decimal("accountValue", &self.margin_summary.account_value)?,
            available: parse_decimal("withdrawable", &self.withdrawable)?,
            frozen: parse_decimal("totalMarginUsed", &self.margin_summary.total_margin_used)?,
            ..Balance::zero(PERP_QUOTE)
        };
        Ok(Account::new(PERP_ACCOUNT, "Perpetuals").with_balance(balance))
    }
}

// --------------------------------------------------------------------
// frontendOpenOrders
// --------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenOrder {
    pub coin: String,
    pub side: String, // "B" (bid) or "A" (ask)
    #[serde(rename = "limitPx")]
    pub limit_px: String,
    pub sz: String,
    pub oid: u64,
    pub timestamp: u64,
    #[serde(rename = "origSz", default)]
    pub orig_sz: Option<String>,
    #[serde(default)]
    pub cloid: Option<String>,
}

impl OpenOrder {
    pub fn into_order(self) -> Result<Order, ServiceError> {
        let order_type = match self.side.as_str() {
            "B" => OrderType::Bid,
            "A" => OrderType::Ask,
            other => {
                return Err(ServiceError::Parse(format!(
                    "Invalid side '{}' on order {}",
                    other, self.oid
                )))
            }
        };

        let remaining = parse_decimal("sz", &self.sz)?;
        let original = match &self.orig_sz {
            Some(orig_sz) => parse_decimal("origSz", orig_sz)?,
            None => remaining,
        };
        let status = if remaining < original {
            OrderStatus::PartiallyFilled
        } else {
            OrderStatus::New
        };

        Ok(Order {
            order_id: self.oid.to_string(),
            order_type,
            currency_pair: pair_for_coin(&self.coin),
            original_amount: original,
            limit_price: Some(parse_decimal("limitPx", &self.limit_px)?),
            average_price: None,
            cumulative_amount: original - remaining,
            fee: None,
            status,
            user_reference: self.cloid,
            timestamp: parse_millis("timestamp", self.timestamp)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_l2_book_to_ticker() {
        let book: L2Snapshot = serde_json::from_str(
            r#"{
                "coin": "BTC",
                "time": 1700000000000,
                "levels": [
                    [{"px": "64000.0", "sz": "1.5", "n": 3}, {"px": "63999.0", "sz": "2.0", "n": 1}],
                    [{"px": "64002.0", "sz": "0.5", "n": 1}]
                ]
            }"#,
        )
        .unwrap();

        let pair = CurrencyPair::new(Currency::BTC, Currency::USDC);
        let ticker = book.into_ticker(pair.clone()).unwrap().unwrap();

        assert_eq!(ticker.currency_pair, pair);
        assert_eq!(ticker.last, dec!(64001));
        assert_eq!(ticker.bid, Some(dec!(64000)));
        assert_eq!(ticker.bid_size, Some(dec!(1.5)));
        assert_eq!(ticker.ask, Some(dec!(64002)));
        assert_eq!(ticker.ask_size, Some(dec!(0.5)));
        assert_eq!(ticker.timestamp.timestamp_millis(), 1_700_000_000_000);
    }

    #[test]
    fn test_empty_book_has_no_ticker() {
        let book: L2Snapshot =
            serde_json::from_str(r#"{"coin": "BTC", "time": 1700000000000, "levels": [[], []]}"#)
                .unwrap();
        let pair = CurrencyPair::new(Currency::BTC, Currency::USDC);
        assert!(book.into_ticker(pair).unwrap().is_none());
    }

    #[test]
    fn test_spot_state_to_account() {
        let state: SpotClearinghouseState = serde_json::from_str(
            r#"{"balances": [
                {"coin": "USDC", "token": 0, "hold": "2.5", "total": "14.625485", "entryNtl": "0.0"},
                {"coin": "PURR", "token": 1, "hold": "0.0", "total": "2000", "entryNtl": "1234.56"}
            ]}"#,
        )
        .unwrap();

        let account = state.into_account().unwrap();
        assert_eq!(account.account_id, SPOT_ACCOUNT);
        assert_eq!(account.balances.len(), 2);

        let usdc = account.balance(&Currency::USDC).unwrap();
        assert_eq!(usdc.total, dec!(14.625485));
        assert_eq!(usdc.frozen, dec!(2.5));
        assert_eq!(usdc.available, dec!(12.125485));
        assert_eq!(usdc.borrowed, Decimal::ZERO);
    }

    #[test]
    fn test_perp_state_to_account() {
        let state: ClearinghouseState = serde_json::from_str(
            r#"{
                "assetPositions": [],
                "crossMaintenanceMarginUsed": "0.0",
                "marginSummary": {
                    "accountValue": "1000.5",
                    "totalMarginUsed": "120.0",
                    "totalNtlPos": "1200.0",
                    "totalRawUsd": "1000.5"
                },
                "time": 1700000000000,
                "withdrawable": "880.5"
            }"#,
        )
        .unwrap();

        let account = state.into_account().unwrap();
        assert_eq!(account.account_id, PERP_ACCOUNT);

        let usdc = account.balance(&Currency::USDC).unwrap();
        assert_eq!(usdc.total, dec!(1000.5));
        assert_eq!(usdc.available, dec!(880.5));
        assert_eq!(usdc.frozen, dec!(120));
    }

    #[test]
    fn test_open_orders_to_orders() {
        let orders: Vec<OpenOrder> = serde_json::from_str(
            r#"[
                {"coin": "BTC", "side": "A", "limitPx": "29792.0", "sz": "0.4",
                 "oid": 91490942, "timestamp": 1681247412573, "origSz": "1.0"},
                {"coin": "PURR/USDC", "side": "B", "limitPx": "0.2", "sz": "100",
                 "oid": 91490943, "timestamp": 1681247412574, "origSz": "100",
                 "cloid": "0x1234"}
            ]"#,
        )
        .unwrap();
        let orders: Vec<Order> = orders
            .into_iter()
            .map(OpenOrder::into_order)
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(orders[0].order_id, "91490942");
        assert_eq!(orders[0].order_type, OrderType::Ask);
        assert_eq!(orders[0].currency_pair.to_string(), "BTC/USDC");
        assert_eq!(orders[0].status, OrderStatus::PartiallyFilled);
        assert_eq!(orders[0].cumulative_amount, dec!(0.6));
        assert_eq!(orders[0].remaining_amount(), dec!(0.4));

        assert_eq!(orders[1].order_type, OrderType::Bid);
        assert_eq!(orders[1].status, OrderStatus::New);
        assert_eq!(orders[1].user_reference.as_deref(), Some("0x1234"));
    }

    #[test]
    fn test_unknown_side_is_a_parse_error() {
        let order: OpenOrder = serde_json::from_str(
            r#"{"coin": "BTC", "side": "X", "limitPx": "1", "sz": "1", "oid": 1, "timestamp": 1}"#,
        )
        .unwrap();
        assert!(matches!(order.into_order(), Err(ServiceError::Parse(_))));
    }
}
