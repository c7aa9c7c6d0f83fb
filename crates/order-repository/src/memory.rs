//! In-memory order repository implementation.

use std::sync::Arc;

use async_trait::async_trait;
use common::OrderId;
use domain::Order;
use tokio::sync::RwLock;

use crate::{
    RepositoryError, Result,
    repository::OrderRepository,
    row::{OrderItemRow, OrderRow, restore_order},
};

/// Row tables guarded by one lock. Holding the write guard for the whole
/// mutation is this backend's transaction boundary: readers see either
/// the fully-old or the fully-new row set, never a mix.
#[derive(Default)]
struct Tables {
    orders: Vec<OrderRow>,
    order_items: Vec<OrderItemRow>,
}

/// In-memory order repository.
///
/// Stores the same row shapes as the PostgreSQL implementation and
/// enforces the same id constraints, so tests exercise the identical
/// observable semantics without a database.
#[derive(Clone, Default)]
pub struct InMemoryOrderRepository {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryOrderRepository {
    /// Creates a new empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored root rows.
    pub async fn order_count(&self) -> usize {
        self.tables.read().await.orders.len()
    }

    /// Returns the total number of stored item rows across all orders.
    pub async fn item_row_count(&self) -> usize {
        self.tables.read().await.order_items.len()
    }

    /// Drops every stored row.
    pub async fn clear(&self) {
        let mut tables = self.tables.write().await;
        tables.orders.clear();
        tables.order_items.clear();
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    #[tracing::instrument(skip(self, order), fields(order_id = %order.id()))]
    async fn create(&self, order: &Order) -> Result<()> {
        let mut tables = self.tables.write().await;

        if tables.orders.iter().any(|row| row.id == order.id().as_str()) {
            return Err(RepositoryError::Constraint(format!(
                "order {} already exists",
                order.id()
            )));
        }

        tables.orders.push(OrderRow::from_order(order));
        tables.order_items.extend(
            order
                .items()
                .iter()
                .map(|item| OrderItemRow::from_item(order.id(), item)),
        );

        metrics::counter!("repository_orders_created").increment(1);
        Ok(())
    }

    #[tracing::instrument(skip(self, order), fields(order_id = %order.id()))]
    async fn update(&self, order: &Order) -> Result<()> {
        let mut tables = self.tables.write().await;

        let Some(pos) = tables
            .orders
            .iter()
            .position(|row| row.id == order.id().as_str())
        else {
            // mirrors the foreign-key failure the SQL backend reports
            return Err(RepositoryError::Constraint(format!(
                "order {} does not exist",
                order.id()
            )));
        };

        tables
            .order_items
            .retain(|row| row.order_id != order.id().as_str());
        tables.order_items.extend(
            order
                .items()
                .iter()
                .map(|item| OrderItemRow::from_item(order.id(), item)),
        );
        tables.orders[pos] = OrderRow::from_order(order);

        metrics::counter!("repository_orders_updated").increment(1);
        Ok(())
    }

    async fn find(&self, id: &OrderId) -> Result<Order> {
        let tables = self.tables.read().await;

        let root = tables
            .orders
            .iter()
            .find(|row| row.id == id.as_str())
            .cloned()
            .ok_or(RepositoryError::NotFound)?;

        let items: Vec<OrderItemRow> = tables
            .order_items
            .iter()
            .filter(|row| row.order_id == id.as_str())
            .cloned()
            .collect();

        Ok(restore_order(root, items))
    }

    async fn find_all(&self) -> Result<Vec<Order>> {
        let tables = self.tables.read().await;

        let orders = tables
            .orders
            .iter()
            .map(|root| {
                let items: Vec<OrderItemRow> = tables
                    .order_items
                    .iter()
                    .filter(|row| row.order_id == root.id)
                    .cloned()
                    .collect();
                restore_order(root.clone(), items)
            })
            .collect();

        Ok(orders)
    }
}
