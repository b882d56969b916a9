// flux-common/src/dto/account.rs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::balance::Balance;
use super::currency::Currency;
use crate::entity::Entity;

/// An exchange account and its balances, keyed by currency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub account_id: String,
    pub name: String,
    #[serde(default)]
    pub balances: BTreeMap<Currency, Balance>,
}

impl Account {
    pub fn new(account_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            name: name.into(),
            balances: BTreeMap::new(),
        }
    }

    /// Adds or replaces the balance for its currency.
    pub fn with_balance(mut self, balance: Balance) -> Self {
        self.balances.insert(balance.currency.clone(), balance);
        self
    }

    pub fn balance(&self, currency: &Currency) -> Option<&Balance> {
        self.balances.get(currency)
    }
}

impl PartialEq for Account {
    fn eq(&self, other: &Self) -> bool {
        if self.account_id != other.account_id
            || self.name != other.name
            || self.balances.len() != other.balances.len()
        {
            return false;
        }

        // Same size, so every entry on the left having an equal partner on the
        // right means the two mappings hold the same currencies.
        self.balances
            .iter()
            .all(|(currency, balance)| other.balances.get(currency) == Some(balance))
    }
}

impl Eq for Account {}

impl Entity for Account {
    type Key = String;

    const KIND: &'static str = "account";

    fn key(&self) -> String {
        self.account_id.clone()
    }
}
