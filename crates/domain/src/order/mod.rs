//! Order aggregate and related types.

mod aggregate;
mod value_objects;

pub use aggregate::Order;
pub use value_objects::{Money, OrderItem};

use thiserror::Error;

/// Errors that can occur when constructing or mutating an order.
#[derive(Debug, Error)]
pub enum OrderError {
    /// Order ID is required.
    #[error("Order ID is required")]
    OrderIdRequired,

    /// Customer ID is required.
    #[error("Customer ID is required")]
    CustomerIdRequired,

    /// Order has no items.
    #[error("Order has no items")]
    NoItems,

    /// Invalid quantity.
    #[error("Invalid quantity: {quantity} (must be greater than 0)")]
    InvalidQuantity { quantity: u32 },

    /// Invalid unit price.
    #[error("Invalid price: {price} (must not be negative)")]
    InvalidPrice { price: i64 },

    /// Item not found in order.
    #[error("Item not found: {item_id}")]
    ItemNotFound { item_id: String },
}
