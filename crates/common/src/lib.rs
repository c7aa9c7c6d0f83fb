//! Shared identifier types used across the order kernel.
//!
//! All entity identifiers are opaque strings chosen by the caller. Wrapping
//! them in newtypes keeps an order id from being passed where a product id
//! is expected.

pub mod types;

pub use types::{CustomerId, OrderId, OrderItemId, ProductId};
