//! Order persistence abstraction.

use crate::error::StoreError;
use crate::types::{Order, OrderStatus};
use async_trait::async_trait;
use uuid::Uuid;

/// CRUD access to recorded orders.
///
/// The metrics engine only needs [`list`](OrderStore::list); the rest is
/// there for the execution layer that owns the store.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Insert a new order.
    async fn create(&self, order: Order) -> Result<(), StoreError>;

    /// Fetch an order by ID.
    async fn get(&self, id: Uuid) -> Result<Order, StoreError>;

    /// Replace an existing order.
    async fn update(&self, order: Order) -> Result<(), StoreError>;

    /// Remove an order.
    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;

    /// List all orders in creation order.
    async fn list(&self) -> Result<Vec<Order>, StoreError>;

    /// List orders with the given status.
    async fn list_by_status(&self, status: OrderStatus) -> Result<Vec<Order>, StoreError> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .filter(|order| order.status == status)
            .collect())
    }
}
