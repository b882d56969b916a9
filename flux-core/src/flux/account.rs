// flux/account.rs

use async_trait::async_trait;
use flux_common::Account;
use std::sync::Arc;

use super::errors::FluxError;
use super::fetcher::{Snapshot, SnapshotFetcher};
use super::poller::{Poller, PollerConfig};
use crate::service::UserService;

/// Accounts of the current user. A missing user means no snapshot.
pub struct AccountFetcher {
    user_service: Arc<dyn UserService>,
}

impl AccountFetcher {
    pub fn new(user_service: Arc<dyn UserService>) -> Self {
        Self { user_service }
    }
}

#[async_trait]
impl SnapshotFetcher<Account> for AccountFetcher {
    async fn fetch(&self) -> Result<Snapshot<Account>, FluxError> {
        let user = self.user_service.get_user().await?;
        Ok(user.map(|user| user.into_accounts()).into())
    }
}

impl Poller<Account> {
    pub fn from_user_service(config: PollerConfig, user_service: Arc<dyn UserService>) -> Self {
        Poller::new(config, Arc::new(AccountFetcher::new(user_service)))
    }
}
