//! Order aggregate implementation.

use common::{CustomerId, OrderId, OrderItemId};

use super::{Money, OrderError, OrderItem};

/// Order aggregate root.
///
/// All access to the owned line items goes through the order. The id is
/// immutable after construction; the item collection can change shape
/// arbitrarily over the order's life but is never left empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    id: OrderId,
    customer_id: CustomerId,
    items: Vec<OrderItem>,
}

impl Order {
    /// Creates a new order.
    ///
    /// Both ids must be non-empty and the order must contain at least one
    /// item.
    pub fn new(
        id: impl Into<OrderId>,
        customer_id: impl Into<CustomerId>,
        items: Vec<OrderItem>,
    ) -> Result<Self, OrderError> {
        let id = id.into();
        let customer_id = customer_id.into();

        if id.as_str().is_empty() {
            return Err(OrderError::OrderIdRequired);
        }
        if customer_id.as_str().is_empty() {
            return Err(OrderError::CustomerIdRequired);
        }
        if items.is_empty() {
            return Err(OrderError::NoItems);
        }

        Ok(Self {
            id,
            customer_id,
            items,
        })
    }

    /// Rebuilds an order from persisted state.
    ///
    /// Stored values are trusted verbatim; no re-validation or
    /// re-derivation from product data happens here.
    pub fn restore(id: OrderId, customer_id: CustomerId, items: Vec<OrderItem>) -> Self {
        Self {
            id,
            customer_id,
            items,
        }
    }

    /// Returns the order ID.
    pub fn id(&self) -> &OrderId {
        &self.id
    }

    /// Returns the owning customer's ID.
    pub fn customer_id(&self) -> &CustomerId {
        &self.customer_id
    }

    /// Returns the line items in order.
    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    /// Returns the number of line items.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the order total: the sum of all item subtotals.
    pub fn total(&self) -> Money {
        self.items
            .iter()
            .fold(Money::zero(), |acc, item| acc + item.subtotal())
    }

    /// Reassigns the order to a different customer.
    pub fn change_customer(&mut self, customer_id: impl Into<CustomerId>) {
        self.customer_id = customer_id.into();
    }

    /// Appends a line item.
    pub fn add_item(&mut self, item: OrderItem) {
        self.items.push(item);
    }

    /// Removes the line item with the given ID.
    ///
    /// Fails when the item is not part of this order, or when removing it
    /// would leave the order empty.
    pub fn remove_item(&mut self, item_id: &OrderItemId) -> Result<(), OrderError> {
        let pos = self
            .items
            .iter()
            .position(|item| &item.id == item_id)
            .ok_or_else(|| OrderError::ItemNotFound {
                item_id: item_id.to_string(),
            })?;

        if self.items.len() == 1 {
            return Err(OrderError::NoItems);
        }

        self.items.remove(pos);
        Ok(())
    }

    /// Replaces the entire item collection.
    pub fn replace_items(&mut self, items: Vec<OrderItem>) -> Result<(), OrderError> {
        if items.is_empty() {
            return Err(OrderError::NoItems);
        }

        self.items = items;
        Ok(())
    }
}
