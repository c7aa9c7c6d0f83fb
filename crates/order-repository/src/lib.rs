//! Persistence for the order aggregate.
//!
//! The repository stores an order as one root row plus one row per line
//! item and guarantees that, after every successful write, the persisted
//! item rows exactly mirror the aggregate's in-memory item collection.
//! Updates rewrite the item set wholesale inside one transaction, which is
//! correct under any transformation of the collection.
//!
//! Two backends implement the [`OrderRepository`] seam:
//! - [`PostgresOrderRepository`] over a `sqlx` connection pool
//! - [`InMemoryOrderRepository`] for tests and embedded use

pub mod config;
pub mod error;
pub mod memory;
pub mod postgres;
pub mod repository;

mod row;

pub use config::DatabaseConfig;
pub use error::{RepositoryError, Result};
pub use memory::InMemoryOrderRepository;
pub use postgres::PostgresOrderRepository;
pub use repository::OrderRepository;
