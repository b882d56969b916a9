// flux-common/src/dto/user.rs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::account::Account;

/// Exchange user as returned by the upstream account endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub accounts: BTreeMap<String, Account>,
}

impl User {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            accounts: BTreeMap::new(),
        }
    }

    pub fn with_account(mut self, account: Account) -> Self {
        self.accounts.insert(account.account_id.clone(), account);
        self
    }

    pub fn into_accounts(self) -> Vec<Account> {
        self.accounts.into_values().collect()
    }
}
