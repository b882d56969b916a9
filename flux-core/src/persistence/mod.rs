// persistence/mod.rs
// Order storage consulted by the order flux. Orders found here at startup are
// treated as already known and are not announced again.

use async_trait::async_trait;
use dashmap::DashMap;
use flux_common::Order;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("Storage error: {0}")]
    Storage(String),
}

#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Order>, PersistenceError>;

    async fn find_by_id(&self, order_id: &str) -> Result<Option<Order>, PersistenceError>;

    /// Inserts the order or replaces the stored version with the same id
    async fn save(&self, order: &Order) -> Result<(), PersistenceError>;
}

/// Process-local repository
#[derive(Default)]
pub struct InMemoryOrderRepository {
    orders: DashMap<String, Order>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn find_all(&self) -> Result<Vec<Order>, PersistenceError> {
        let mut orders: Vec<Order> = self
            .orders
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        orders.sort_by(|a, b| a.order_id.cmp(&b.order_id));
        Ok(orders)
    }

    async fn find_by_id(&self, order_id: &str) -> Result<Option<Order>, PersistenceError> {
        Ok(self.orders.get(order_id).map(|entry| entry.value().clone()))
    }

    async fn save(&self, order: &Order) -> Result<(), PersistenceError> {
        self.orders.insert(order.order_id.clone(), order.clone());
        Ok(())
    }
}
