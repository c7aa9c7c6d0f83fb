//! Domain layer for the order-management context.
//!
//! This crate provides:
//! - The [`Order`] aggregate root and its owned [`OrderItem`] collection
//! - [`Money`] as integer cents
//! - Lifecycle event payloads and the event-type names they are routed by
//! - Notification handlers observing those events

pub mod events;
pub mod handlers;
pub mod order;

pub use common::{CustomerId, OrderId, OrderItemId, ProductId};
pub use events::{ORDER_CREATED, ORDER_UPDATED, OrderCreatedEvent, OrderUpdatedEvent};
pub use handlers::{LogWhenOrderIsCreatedHandler, NotifyCustomerWhenOrderIsChangedHandler};
pub use order::{Money, Order, OrderError, OrderItem};
