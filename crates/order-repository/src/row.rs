//! Row-level representation shared by the storage backends.

use common::{CustomerId, OrderId, OrderItemId, ProductId};
use domain::{Money, Order, OrderItem};

/// One row in the `orders` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OrderRow {
    pub id: String,
    pub customer_id: String,
    pub total: i64,
}

impl OrderRow {
    /// Flattens the aggregate root into its persisted form. The total is
    /// computed here so the stored value always matches the item rows
    /// written alongside it.
    pub fn from_order(order: &Order) -> Self {
        Self {
            id: order.id().to_string(),
            customer_id: order.customer_id().to_string(),
            total: order.total().cents(),
        }
    }
}

/// One row in the `order_items` table, carrying the owning order's id as
/// a foreign key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OrderItemRow {
    pub id: String,
    pub name: String,
    pub price: i64,
    pub quantity: i32,
    pub order_id: String,
    pub product_id: String,
}

impl OrderItemRow {
    pub fn from_item(order_id: &OrderId, item: &OrderItem) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name.clone(),
            price: item.unit_price.cents(),
            quantity: item.quantity as i32,
            order_id: order_id.to_string(),
            product_id: item.product_id.to_string(),
        }
    }

    pub fn into_item(self) -> OrderItem {
        OrderItem {
            id: OrderItemId::new(self.id),
            name: self.name,
            unit_price: Money::from_cents(self.price),
            product_id: ProductId::new(self.product_id),
            quantity: self.quantity as u32,
        }
    }
}

/// Rebuilds the aggregate from its root row and item rows, trusting the
/// persisted values verbatim.
pub(crate) fn restore_order(root: OrderRow, items: Vec<OrderItemRow>) -> Order {
    Order::restore(
        OrderId::new(root.id),
        CustomerId::new(root.customer_id),
        items.into_iter().map(OrderItemRow::into_item).collect(),
    )
}
