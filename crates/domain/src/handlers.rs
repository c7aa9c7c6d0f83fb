//! Notification handlers for order lifecycle events.
//!
//! These observers react to dispatched events with log output. They are
//! also realistic fixtures for wiring a dispatcher in tests and
//! bootstrap code; anything heavier (mail, queues) belongs to the
//! surrounding application.

use async_trait::async_trait;
use event_dispatcher::{Event, EventHandler};

use crate::events::{OrderCreatedEvent, OrderUpdatedEvent};

/// Logs every order creation it observes.
pub struct LogWhenOrderIsCreatedHandler;

#[async_trait]
impl EventHandler for LogWhenOrderIsCreatedHandler {
    fn name(&self) -> &'static str {
        "log-when-order-is-created"
    }

    async fn handle(&self, event: &Event) -> event_dispatcher::Result<()> {
        let payload: OrderCreatedEvent = serde_json::from_value(event.payload.clone())?;
        tracing::info!(
            order_id = %payload.order_id,
            customer_id = %payload.customer_id,
            total = %payload.total,
            "order created"
        );
        Ok(())
    }
}

/// Tells the owning customer about changes to their order.
pub struct NotifyCustomerWhenOrderIsChangedHandler;

#[async_trait]
impl EventHandler for NotifyCustomerWhenOrderIsChangedHandler {
    fn name(&self) -> &'static str {
        "notify-customer-when-order-is-changed"
    }

    async fn handle(&self, event: &Event) -> event_dispatcher::Result<()> {
        let payload: OrderUpdatedEvent = serde_json::from_value(event.payload.clone())?;
        tracing::info!(
            order_id = %payload.order_id,
            customer_id = %payload.customer_id,
            total = %payload.total,
            "order changed, notifying customer"
        );
        Ok(())
    }
}
