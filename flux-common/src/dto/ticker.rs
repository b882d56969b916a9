// flux-common/src/dto/ticker.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::currency::CurrencyPair;
use super::decimal::{decimal_eq, optional_decimal_eq};
use crate::entity::Entity;

/// Market summary for one currency pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticker {
    pub currency_pair: CurrencyPair,
    pub last: Decimal,
    pub bid: Option<Decimal>,
    pub ask: Option<Decimal>,
    pub high: Option<Decimal>,
    pub low: Option<Decimal>,
    pub open: Option<Decimal>,
    pub vwap: Option<Decimal>,
    pub volume: Option<Decimal>,
    pub quote_volume: Option<Decimal>,
    pub bid_size: Option<Decimal>,
    pub ask_size: Option<Decimal>,
    pub timestamp: DateTime<Utc>,
}

impl Ticker {
    pub fn new(currency_pair: CurrencyPair, last: Decimal, timestamp: DateTime<Utc>) -> Self {
        Self {
            currency_pair,
            last,
            bid: None,
            ask: None,
            high: None,
            low: None,
            open: None,
            vwap: None,
            volume: None,
            quote_volume: None,
            bid_size: None,
            ask_size: None,
            timestamp,
        }
    }

    fn optional_amounts(&self) -> [Option<&Decimal>; 10] {
        [
            self.bid.as_ref(),
            self.ask.as_ref(),
            self.high.as_ref(),
            self.low.as_ref(),
            self.open.as_ref(),
            self.vwap.as_ref(),
            self.volume.as_ref(),
            self.quote_volume.as_ref(),
            self.bid_size.as_ref(),
            self.ask_size.as_ref(),
        ]
    }
}

impl PartialEq for Ticker {
    fn eq(&self, other: &Self) -> bool {
        self.currency_pair == other.currency_pair
            && decimal_eq(&self.last, &other.last)
            && self.timestamp == other.timestamp
            && self
                .optional_amounts()
                .into_iter()
                .zip(other.optional_amounts())
                .all(|(a, b)| optional_decimal_eq(a, b))
    }
}

impl Eq for Ticker {}

impl Entity for Ticker {
    type Key = CurrencyPair;

    const KIND: &'static str = "ticker";

    fn key(&self) -> CurrencyPair {
        self.currency_pair.clone()
    }
}
