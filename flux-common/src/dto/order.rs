// flux-common/src/dto/order.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::currency::CurrencyPair;
use super::decimal::{decimal_eq, optional_decimal_eq};
use crate::entity::Entity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    /// Buy order
    Bid,
    /// Sell order
    Ask,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    PendingNew,
    New,
    PartiallyFilled,
    Filled,
    Canceled,
    Rejected,
    Expired,
    Unknown,
}

impl OrderStatus {
    /// No further updates are expected once an order reaches one of these.
    pub fn is_final(&self) -> bool {
        matches!(
            self,
            OrderStatus::Filled | OrderStatus::Canceled | OrderStatus::Rejected | OrderStatus::Expired
        )
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OrderStatus::PendingNew => "PENDING_NEW",
            OrderStatus::New => "NEW",
            OrderStatus::PartiallyFilled => "PARTIALLY_FILLED",
            OrderStatus::Filled => "FILLED",
            OrderStatus::Canceled => "CANCELED",
            OrderStatus::Rejected => "REJECTED",
            OrderStatus::Expired => "EXPIRED",
            OrderStatus::Unknown => "UNKNOWN",
        };
        f.write_str(label)
    }
}

/// An order as reported by the exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub order_id: String,
    pub order_type: OrderType,
    pub currency_pair: CurrencyPair,
    pub original_amount: Decimal,
    pub limit_price: Option<Decimal>,
    pub average_price: Option<Decimal>,
    pub cumulative_amount: Decimal,
    pub fee: Option<Decimal>,
    pub status: OrderStatus,
    pub user_reference: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl Order {
    pub fn remaining_amount(&self) -> Decimal {
        self.original_amount - self.cumulative_amount
    }
}

impl PartialEq for Order {
    fn eq(&self, other: &Self) -> bool {
        self.order_id == other.order_id
            && self.order_type == other.order_type
            && self.currency_pair == other.currency_pair
            && decimal_eq(&self.original_amount, &other.original_amount)
            && optional_decimal_eq(self.limit_price.as_ref(), other.limit_price.as_ref())
            && optional_decimal_eq(self.average_price.as_ref(), other.average_price.as_ref())
            && decimal_eq(&self.cumulative_amount, &other.cumulative_amount)
            && optional_decimal_eq(self.fee.as_ref(), other.fee.as_ref())
            && self.status == other.status
            && self.user_reference == other.user_reference
            && self.timestamp == other.timestamp
    }
}

impl Eq for Order {}

impl Entity for Order {
    type Key = String;

    const KIND: &'static str = "order";

    fn key(&self) -> String {
        self.order_id.clone()
    }
}
