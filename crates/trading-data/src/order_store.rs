//! In-memory order store.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;
use trading_core::error::{DataError, StoreError};
use trading_core::traits::OrderStore;
use trading_core::types::Order;
use uuid::Uuid;

/// Order store backed by a vector kept in creation order.
#[derive(Debug, Clone, Default)]
pub struct MemoryOrderStore {
    orders: Arc<RwLock<Vec<Order>>>,
}

impl MemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with `orders`; later duplicates of an ID replace
    /// earlier ones.
    pub fn with_orders(orders: Vec<Order>) -> Self {
        let mut index: HashMap<Uuid, usize> = HashMap::with_capacity(orders.len());
        let mut unique: Vec<Order> = Vec::with_capacity(orders.len());
        for order in orders {
            match index.get(&order.id) {
                Some(&pos) => unique[pos] = order,
                None => {
                    index.insert(order.id, unique.len());
                    unique.push(order);
                }
            }
        }
        Self {
            orders: Arc::new(RwLock::new(unique)),
        }
    }

    /// Load a JSON array of orders.
    pub async fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let content = tokio::fs::read_to_string(path.as_ref()).await?;
        let orders: Vec<Order> =
            serde_json::from_str(&content).map_err(|e| DataError::ParseError(e.to_string()))?;
        debug!(orders = orders.len(), path = %path.as_ref().display(), "loaded order history");
        Ok(Self::with_orders(orders))
    }
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
    async fn create(&self, order: Order) -> Result<(), StoreError> {
        let mut orders = self.orders.write().await;
        if orders.iter().any(|o| o.id == order.id) {
            return Err(StoreError::DuplicateOrder(order.id));
        }
        orders.push(order);
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Order, StoreError> {
        self.orders
            .read()
            .await
            .iter()
            .find(|o| o.id == id)
            .cloned()
            .ok_or(StoreError::OrderNotFound(id))
    }

    async fn update(&self, order: Order) -> Result<(), StoreError> {
        let mut orders = self.orders.write().await;
        let existing = orders
            .iter_mut()
            .find(|o| o.id == order.id)
            .ok_or(StoreError::OrderNotFound(order.id))?;
        *existing = order;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let mut orders = self.orders.write().await;
        let index = orders
            .iter()
            .position(|o| o.id == id)
            .ok_or(StoreError::OrderNotFound(id))?;
        orders.remove(index);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Order>, StoreError> {
        Ok(self.orders.read().await.clone())
    }
}
