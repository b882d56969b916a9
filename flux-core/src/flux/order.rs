// flux/order.rs

use async_trait::async_trait;
use flux_common::{Order, OrderStatus};
use std::sync::Arc;
use tracing::debug;

use super::diff::{Change, ChangeKind};
use super::emitter::FluxHandler;
use super::errors::FluxError;
use super::fetcher::{Snapshot, SnapshotFetcher};
use super::poller::{Poller, PollerConfig};
use crate::persistence::{OrderRepository, PersistenceError};
use crate::service::TradeService;

pub struct OrderFetcher {
    trade_service: Arc<dyn TradeService>,
}

impl OrderFetcher {
    pub fn new(trade_service: Arc<dyn TradeService>) -> Self {
        Self { trade_service }
    }
}

#[async_trait]
impl SnapshotFetcher<Order> for OrderFetcher {
    async fn fetch(&self) -> Result<Snapshot<Order>, FluxError> {
        Ok(self.trade_service.get_orders().await?.into())
    }
}

/// Keeps the repository in step with every order the flux reports.
struct PersistOrders {
    repository: Arc<dyn OrderRepository>,
}

#[async_trait]
impl FluxHandler<Order> for PersistOrders {
    async fn handle(&self, change: &Change<Order>) -> anyhow::Result<()> {
        match change.kind {
            ChangeKind::New | ChangeKind::Updated => {
                self.repository.save(&change.entity).await?;
            }
            // Gone upstream without a final status. Keep the last seen amounts
            // but stop treating it as open.
            ChangeKind::Removed if !change.entity.status.is_final() => {
                let vanished = Order {
                    status: OrderStatus::Unknown,
                    ..change.entity.clone()
                };
                self.repository.save(&vanished).await?;
            }
            ChangeKind::Removed => {}
        }
        Ok(())
    }
}

/// Stored orders that upstream may still report. Closed and vanished orders
/// stay in the repository as history only.
fn may_still_be_open(order: &Order) -> bool {
    !order.status.is_final() && order.status != OrderStatus::Unknown
}

impl Poller<Order> {
    /// Order flux seeded with the open orders from the repository, so orders
    /// persisted by an earlier run are not reported as new again and closed
    /// ones are not reported as removed again. The persisting handler is
    /// registered first and runs before any handler added later.
    pub async fn from_trade_service(
        config: PollerConfig,
        trade_service: Arc<dyn TradeService>,
        repository: Arc<dyn OrderRepository>,
    ) -> Result<Self, PersistenceError> {
        let known: Vec<Order> = repository
            .find_all()
            .await?
            .into_iter()
            .filter(may_still_be_open)
            .collect();
        debug!(flux = %config.name, known = known.len(), "Seeding order flux");

        let mut poller = Poller::new(config, Arc::new(OrderFetcher::new(trade_service)))
            .with_initial_state(known);
        poller.register(Arc::new(PersistOrders { repository }));

        Ok(poller)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flux::emitter::ChannelHandler;
    use crate::flux::poller::CycleOutcome;
    use crate::flux::test_support::drain;
    use crate::flux::OrderFlux;
    use crate::persistence::InMemoryOrderRepository;
    use crate::service::ServiceError;
    use chrono::{TimeZone, Utc};
    use flux_common::{Currency, CurrencyPair, OrderType};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;

    struct ScriptedTradeService {
        replies: Mutex<VecDeque<Result<Option<Vec<Order>>, ServiceError>>>,
    }

    impl ScriptedTradeService {
        fn new(replies: Vec<Result<Option<Vec<Order>>, ServiceError>>) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies.into()),
            })
        }
    }

    #[async_trait]
    impl TradeService for ScriptedTradeService {
        async fn get_orders(&self) -> Result<Option<Vec<Order>>, ServiceError> {
            let reply = self.replies.lock().unwrap().pop_front();
            reply.unwrap_or(Ok(None))
        }
    }

    fn order(id: &str, filled: Decimal, status: OrderStatus) -> Order {
        Order {
            order_id: id.to_string(),
            order_type: OrderType::Bid,
            currency_pair: CurrencyPair::new(Currency::ETH, Currency::BTC),
            original_amount: dec!(2),
            limit_price: Some(dec!(0.05)),
            average_price: None,
            cumulative_amount: filled,
            fee: None,
            status,
            user_reference: None,
            timestamp: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
        }
    }

    fn config() -> PollerConfig {
        PollerConfig::new("order", Duration::from_secs(1))
    }

    #[tokio::test]
    async fn test_orders_are_emitted_and_persisted() {
        let service = ScriptedTradeService::new(vec![
            Ok(Some(vec![order("A", dec!(0), OrderStatus::New)])),
            Ok(Some(vec![
                order("A", dec!(1), OrderStatus::PartiallyFilled),
                order("B", dec!(0), OrderStatus::New),
            ])),
            Ok(None),
            Ok(Some(Vec::new())),
        ]);
        let repository = Arc::new(InMemoryOrderRepository::new());

        let mut flux = OrderFlux::from_trade_service(config(), service, repository.clone())
            .await
            .unwrap();
        let (handler, mut rx) = ChannelHandler::<Order>::channel();
        flux.register(Arc::new(handler));

        flux.poll_once().await;
        assert_eq!(drain(&mut rx), vec![(ChangeKind::New, "A".to_string())]);

        flux.poll_once().await;
        assert_eq!(
            drain(&mut rx),
            vec![
                (ChangeKind::Updated, "A".to_string()),
                (ChangeKind::New, "B".to_string()),
            ]
        );
        let stored = repository.find_by_id("A").await.unwrap().unwrap();
        assert_eq!(stored.status, OrderStatus::PartiallyFilled);
        assert_eq!(repository.len(), 2);

        assert_eq!(flux.poll_once().await, CycleOutcome::Skipped);

        // Orders gone upstream stay in the repository.
        flux.poll_once().await;
        assert!(flux.cache().is_empty());
        assert_eq!(repository.len(), 2);
    }

    #[tokio::test]
    async fn test_restart_does_not_announce_known_orders() {
        let repository = Arc::new(InMemoryOrderRepository::new());
        repository
            .save(&order("A", dec!(1), OrderStatus::PartiallyFilled))
            .await
            .unwrap();

        let service = ScriptedTradeService::new(vec![Ok(Some(vec![
            order("A", dec!(1.0), OrderStatus::PartiallyFilled),
            order("B", dec!(0), OrderStatus::New),
        ]))]);

        let mut flux = OrderFlux::from_trade_service(config(), service, repository.clone())
            .await
            .unwrap();
        let (handler, mut rx) = ChannelHandler::<Order>::channel();
        flux.register(Arc::new(handler));

        assert_eq!(flux.cache().len(), 1);
        flux.poll_once().await;

        assert_eq!(drain(&mut rx), vec![(ChangeKind::New, "B".to_string())]);
        assert_eq!(repository.len(), 2);
    }

    #[tokio::test]
    async fn test_empty_trade_snapshot_is_not_absent() {
        let service = ScriptedTradeService::new(vec![Ok(Some(Vec::new()))]);
        let repository = Arc::new(InMemoryOrderRepository::new());
        let mut flux = OrderFlux::from_trade_service(config(), service, repository)
            .await
            .unwrap();

        assert_eq!(
            flux.poll_once().await,
            CycleOutcome::Applied { emitted: 0, failures: 0 }
        );
    }

    #[tokio::test]
    async fn test_restart_does_not_repeat_removals() {
        let repository = Arc::new(InMemoryOrderRepository::new());
        repository
            .save(&order("OLD", dec!(2), OrderStatus::Filled))
            .await
            .unwrap();
        repository
            .save(&order("A", dec!(0), OrderStatus::New))
            .await
            .unwrap();

        let mut announced = Vec::new();
        for _ in 0..2 {
            let service = ScriptedTradeService::new(vec![Ok(Some(Vec::new()))]);
            let config = config().with_removals(true);
            let mut flux = OrderFlux::from_trade_service(config, service, repository.clone())
                .await
                .unwrap();
            let (handler, mut rx) = ChannelHandler::<Order>::channel();
            flux.register(Arc::new(handler));

            flux.poll_once().await;
            announced.push(drain(&mut rx));
        }

        assert_eq!(announced[0], vec![(ChangeKind::Removed, "A".to_string())]);
        assert!(announced[1].is_empty());

        let vanished = repository.find_by_id("A").await.unwrap().unwrap();
        assert_eq!(vanished.status, OrderStatus::Unknown);
        assert_eq!(repository.len(), 2);
    }
}
