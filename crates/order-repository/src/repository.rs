//! The persistence seam for order aggregates.

use async_trait::async_trait;
use common::OrderId;
use domain::Order;

use crate::Result;

/// Core trait for order repository implementations.
///
/// Implementations must uphold one invariant: after any successful
/// `create` or `update`, the item rows stored under an order id equal the
/// aggregate's current item collection exactly, with no extras and no
/// omissions. All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Persists a new order together with all of its line items.
    ///
    /// Root row and item rows are written in a single transaction. The
    /// order id must not already exist in storage; if it does, the
    /// backend's constraint error is surfaced unmodified.
    async fn create(&self, order: &Order) -> Result<()>;

    /// Rewrites an existing order to match the aggregate's current state.
    ///
    /// Inside one transaction: every item row under the order id is
    /// deleted, the current item collection is inserted fresh, and the
    /// root row's customer id and recomputed total are updated. The three
    /// steps commit or roll back together; a failure leaves storage in
    /// its pre-update state.
    async fn update(&self, order: &Order) -> Result<()>;

    /// Loads the order stored under `id`, items included.
    ///
    /// Persisted item values are trusted verbatim; nothing is re-derived
    /// from product data. A missing order yields
    /// [`RepositoryError::NotFound`](crate::RepositoryError::NotFound),
    /// never a partially populated aggregate.
    async fn find(&self, id: &OrderId) -> Result<Order>;

    /// Loads every stored order, in the backend's natural read order.
    ///
    /// Returns an empty vector when no orders exist.
    async fn find_all(&self) -> Result<Vec<Order>>;
}
