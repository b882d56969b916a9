// flux-common/src/dto/balance.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::currency::Currency;
use super::decimal::decimal_eq;

/// Holdings of one currency inside an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Balance {
    pub currency: Currency,
    pub total: Decimal,
    pub available: Decimal,
    pub frozen: Decimal,
    pub loaned: Decimal,
    pub borrowed: Decimal,
    pub withdrawing: Decimal,
    pub depositing: Decimal,
}

impl Balance {
    /// Balance with every amount at zero.
    pub fn zero(currency: Currency) -> Self {
        Self {
            currency,
            total: Decimal::ZERO,
            available: Decimal::ZERO,
            frozen: Decimal::ZERO,
            loaned: Decimal::ZERO,
            borrowed: Decimal::ZERO,
            withdrawing: Decimal::ZERO,
            depositing: Decimal::ZERO,
        }
    }

    fn amounts(&self) -> [&Decimal; 7] {
        [
            &self.total,
            &self.available,
            &self.frozen,
            &self.loaned,
            &self.borrowed,
            &self.withdrawing,
            &self.depositing,
        ]
    }
}

impl PartialEq for Balance {
    fn eq(&self, other: &Self) -> bool {
        self.currency == other.currency
            && self
                .amounts()
                .iter()
                .zip(other.amounts().iter())
                .all(|(a, b)| decimal_eq(a, b))
    }
}

impl Eq for Balance {}
