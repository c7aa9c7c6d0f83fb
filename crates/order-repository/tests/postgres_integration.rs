//! PostgreSQL integration tests
//!
//! These tests share one PostgreSQL container for efficiency and are
//! ignored by default because they need a running Docker daemon. Run with:
//!
//! ```bash
//! cargo test -p order-repository --test postgres_integration -- --ignored --test-threads=1
//! ```

use std::sync::Arc;

use common::OrderId;
use domain::{Money, Order, OrderItem};
use order_repository::{OrderRepository, PostgresOrderRepository, RepositoryError};
use sqlx::PgPool;
use testcontainers::{ContainerAsync, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

/// Shared container info - container stays alive for all tests
struct ContainerInfo {
    #[allow(dead_code)] // Container must stay alive for tests
    container: ContainerAsync<Postgres>,
    connection_string: String,
}

/// Global shared container
static CONTAINER: OnceCell<Arc<ContainerInfo>> = OnceCell::const_new();

async fn get_container_info() -> Arc<ContainerInfo> {
    CONTAINER
        .get_or_init(|| async {
            let container = Postgres::default().start().await.unwrap();

            let host = container.get_host().await.unwrap();
            let port = container.get_host_port_ipv4(5432).await.unwrap();

            let connection_string =
                format!("postgres://postgres:postgres@{}:{}/postgres", host, port);

            // Create a temporary pool just for the schema
            let temp_pool = PgPool::connect(&connection_string).await.unwrap();

            sqlx::raw_sql(include_str!(
                "../../../migrations/001_create_orders_tables.sql"
            ))
            .execute(&temp_pool)
            .await
            .unwrap();

            temp_pool.close().await;

            Arc::new(ContainerInfo {
                container,
                connection_string,
            })
        })
        .await
        .clone()
}

/// Get a fresh repository with its own pool and cleared tables
async fn get_test_repo() -> PostgresOrderRepository {
    let info = get_container_info().await;

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&info.connection_string)
        .await
        .unwrap();

    // Clear tables for test isolation
    sqlx::query("TRUNCATE TABLE orders, order_items")
        .execute(&pool)
        .await
        .unwrap();

    PostgresOrderRepository::new(pool)
}

fn item(id: &str, name: &str, price: Money, sku: &str, quantity: u32) -> OrderItem {
    OrderItem::new(id, name, price, sku, quantity).unwrap()
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn create_then_find_round_trips_the_aggregate() {
    let repo = get_test_repo().await;

    let order = Order::new(
        "123",
        "123",
        vec![
            item("i1", "Widget", Money::from_dollars(10), "SKU-001", 2),
            item("i2", "Gadget", Money::from_dollars(40), "SKU-002", 1),
        ],
    )
    .unwrap();

    repo.create(&order).await.unwrap();

    let mut found = repo.find(&OrderId::new("123")).await.unwrap();
    let mut sorted_items = found.items().to_vec();
    sorted_items.sort_by(|a, b| a.id.as_str().cmp(b.id.as_str()));
    found.replace_items(sorted_items).unwrap();

    assert_eq!(found, order);
    assert_eq!(found.total(), Money::from_dollars(60));
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn persisted_total_matches_the_computed_total() {
    let repo = get_test_repo().await;

    let order = Order::new(
        "123",
        "c1",
        vec![item("i1", "Widget", Money::from_cents(1999), "SKU-001", 3)],
    )
    .unwrap();
    repo.create(&order).await.unwrap();

    let total: i64 = sqlx::query_scalar("SELECT total FROM orders WHERE id = $1")
        .bind("123")
        .fetch_one(repo.pool())
        .await
        .unwrap();

    assert_eq!(total, 5997);
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn update_replaces_the_item_set_atomically() {
    let repo = get_test_repo().await;

    let order = Order::new(
        "123",
        "1",
        vec![item("i1", "Widget", Money::from_cents(1000), "SKU-001", 1)],
    )
    .unwrap();
    repo.create(&order).await.unwrap();

    let mut changed = order.clone();
    changed.change_customer("12");
    changed
        .replace_items(vec![item("i2", "Gadget", Money::from_cents(500), "SKU-002", 3)])
        .unwrap();
    repo.update(&changed).await.unwrap();

    let found = repo.find(&OrderId::new("123")).await.unwrap();
    assert_eq!(found.customer_id().as_str(), "12");
    assert_eq!(found.items().len(), 1);
    assert_eq!(found.items()[0].id.as_str(), "i2");

    // the replaced item row must no longer exist
    let old_rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM order_items WHERE id = $1")
        .bind("i1")
        .fetch_one(repo.pool())
        .await
        .unwrap();
    assert_eq!(old_rows, 0);
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn update_keeps_unchanged_items_intact() {
    let repo = get_test_repo().await;

    let mut order = Order::new(
        "123",
        "c1",
        vec![item("i1", "Widget", Money::from_cents(1000), "SKU-001", 1)],
    )
    .unwrap();
    repo.create(&order).await.unwrap();

    order.add_item(item("i2", "Gadget", Money::from_cents(500), "SKU-002", 2));
    repo.update(&order).await.unwrap();

    let found = repo.find(&OrderId::new("123")).await.unwrap();
    assert_eq!(found.items().len(), 2);
    assert_eq!(found.total(), Money::from_cents(2000));
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn find_unknown_id_yields_not_found() {
    let repo = get_test_repo().await;

    let result = repo.find(&OrderId::new("never-created")).await;

    let err = result.unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound));
    assert_eq!(err.to_string(), "Order not found");
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn find_all_returns_every_order() {
    let repo = get_test_repo().await;

    let first = Order::new(
        "123",
        "c1",
        vec![item("i1", "Widget", Money::from_cents(1000), "SKU-001", 2)],
    )
    .unwrap();
    let second = Order::new(
        "456",
        "c2",
        vec![item("i2", "Gadget", Money::from_cents(4000), "SKU-002", 1)],
    )
    .unwrap();

    repo.create(&first).await.unwrap();
    repo.create(&second).await.unwrap();

    let all = repo.find_all().await.unwrap();
    assert_eq!(all.len(), 2);
    assert!(all.contains(&first));
    assert!(all.contains(&second));
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn find_all_on_empty_storage_is_empty() {
    let repo = get_test_repo().await;

    let all = repo.find_all().await.unwrap();
    assert!(all.is_empty());
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn create_duplicate_id_surfaces_the_backend_error() {
    let repo = get_test_repo().await;

    let order = Order::new(
        "123",
        "c1",
        vec![item("i1", "Widget", Money::from_cents(1000), "SKU-001", 1)],
    )
    .unwrap();
    repo.create(&order).await.unwrap();

    let result = repo.create(&order).await;
    assert!(matches!(result, Err(RepositoryError::Database(_))));

    // the failed transaction left no partial rows behind
    let items: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM order_items")
        .fetch_one(repo.pool())
        .await
        .unwrap();
    assert_eq!(items, 1);
}
