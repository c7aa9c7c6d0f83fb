//! Order lifecycle event payloads.
//!
//! The dispatcher routes purely on the event-type string the notifying
//! caller supplies; the constants here name the types this crate emits so
//! producers and subscribers agree on the spelling.

use common::{CustomerId, OrderId};
use event_dispatcher::Event;
use serde::{Deserialize, Serialize};

use crate::order::{Money, Order};

/// Event type announced after an order is first persisted.
pub const ORDER_CREATED: &str = "OrderCreated";

/// Event type announced after an existing order's attributes change.
pub const ORDER_UPDATED: &str = "OrderUpdated";

/// Payload for [`ORDER_CREATED`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderCreatedEvent {
    pub order_id: OrderId,
    pub customer_id: CustomerId,
    pub total: Money,
}

impl OrderCreatedEvent {
    /// Builds the payload from the order that was just created.
    pub fn new(order: &Order) -> Self {
        Self {
            order_id: order.id().clone(),
            customer_id: order.customer_id().clone(),
            total: order.total(),
        }
    }

    /// Wraps the payload in a dispatchable envelope.
    pub fn to_event(&self) -> event_dispatcher::Result<Event> {
        Event::from_payload(self)
    }
}

/// Payload for [`ORDER_UPDATED`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderUpdatedEvent {
    pub order_id: OrderId,
    pub customer_id: CustomerId,
    pub total: Money,
}

impl OrderUpdatedEvent {
    /// Builds the payload from the order's post-update state.
    pub fn new(order: &Order) -> Self {
        Self {
            order_id: order.id().clone(),
            customer_id: order.customer_id().clone(),
            total: order.total(),
        }
    }

    /// Wraps the payload in a dispatchable envelope.
    pub fn to_event(&self) -> event_dispatcher::Result<Event> {
        Event::from_payload(self)
    }
}
