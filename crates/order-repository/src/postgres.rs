//! PostgreSQL-backed order repository implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use common::OrderId;
use domain::Order;
use sqlx::{PgPool, Postgres, Row, Transaction, postgres::PgRow};

use crate::{
    RepositoryError, Result,
    repository::OrderRepository,
    row::{OrderItemRow, OrderRow, restore_order},
};

/// PostgreSQL-backed order repository.
#[derive(Clone)]
pub struct PostgresOrderRepository {
    pool: PgPool,
}

impl PostgresOrderRepository {
    /// Creates a new PostgreSQL order repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> std::result::Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("../../migrations").run(&self.pool).await
    }

    /// Bulk-inserts one row per line item of `order` inside `tx`.
    async fn insert_items(tx: &mut Transaction<'_, Postgres>, order: &Order) -> Result<()> {
        let rows: Vec<OrderItemRow> = order
            .items()
            .iter()
            .map(|item| OrderItemRow::from_item(order.id(), item))
            .collect();

        let mut ids = Vec::with_capacity(rows.len());
        let mut names = Vec::with_capacity(rows.len());
        let mut prices = Vec::with_capacity(rows.len());
        let mut quantities = Vec::with_capacity(rows.len());
        let mut order_ids = Vec::with_capacity(rows.len());
        let mut product_ids = Vec::with_capacity(rows.len());
        for row in rows {
            ids.push(row.id);
            names.push(row.name);
            prices.push(row.price);
            quantities.push(row.quantity);
            order_ids.push(row.order_id);
            product_ids.push(row.product_id);
        }

        sqlx::query(
            r#"
            INSERT INTO order_items (id, name, price, quantity, order_id, product_id)
            SELECT * FROM UNNEST($1::text[], $2::text[], $3::bigint[], $4::int[], $5::text[], $6::text[])
            "#,
        )
        .bind(&ids)
        .bind(&names)
        .bind(&prices)
        .bind(&quantities)
        .bind(&order_ids)
        .bind(&product_ids)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }

    /// Rebuilds aggregates from joined root/item rows, preserving the
    /// backend's read order of the root rows.
    fn collect_orders(rows: Vec<PgRow>) -> Result<Vec<Order>> {
        let mut roots: Vec<OrderRow> = Vec::new();
        let mut items: Vec<Vec<OrderItemRow>> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for row in rows {
            let order_id: String = row.try_get("id")?;
            let idx = match index.get(&order_id) {
                Some(&idx) => idx,
                None => {
                    roots.push(OrderRow {
                        id: order_id.clone(),
                        customer_id: row.try_get("customer_id")?,
                        total: row.try_get("total")?,
                    });
                    items.push(Vec::new());
                    index.insert(order_id.clone(), roots.len() - 1);
                    roots.len() - 1
                }
            };

            // LEFT JOIN: a root without items yields NULL item columns
            if let Some(item_id) = row.try_get::<Option<String>, _>("item_id")? {
                items[idx].push(OrderItemRow {
                    id: item_id,
                    name: row.try_get("item_name")?,
                    price: row.try_get("price")?,
                    quantity: row.try_get("quantity")?,
                    order_id,
                    product_id: row.try_get("product_id")?,
                });
            }
        }

        Ok(roots
            .into_iter()
            .zip(items)
            .map(|(root, items)| restore_order(root, items))
            .collect())
    }
}

const SELECT_ORDERS_WITH_ITEMS: &str = r#"
    SELECT o.id, o.customer_id, o.total,
           i.id AS item_id, i.name AS item_name, i.price, i.quantity, i.product_id
    FROM orders o
    LEFT JOIN order_items i ON i.order_id = o.id
"#;

#[async_trait]
impl OrderRepository for PostgresOrderRepository {
    #[tracing::instrument(skip(self, order), fields(order_id = %order.id()))]
    async fn create(&self, order: &Order) -> Result<()> {
        let root = OrderRow::from_order(order);

        let mut tx = self.pool.begin().await?;

        sqlx::query("INSERT INTO orders (id, customer_id, total) VALUES ($1, $2, $3)")
            .bind(&root.id)
            .bind(&root.customer_id)
            .bind(root.total)
            .execute(&mut *tx)
            .await?;

        Self::insert_items(&mut tx, order).await?;

        tx.commit().await?;

        metrics::counter!("repository_orders_created").increment(1);
        tracing::debug!(items = order.items().len(), "order persisted");
        Ok(())
    }

    #[tracing::instrument(skip(self, order), fields(order_id = %order.id()))]
    async fn update(&self, order: &Order) -> Result<()> {
        let root = OrderRow::from_order(order);

        let mut tx = self.pool.begin().await?;

        // rewrite the item set wholesale: correct under any transformation
        // of the collection, at the cost of rewriting unchanged items
        sqlx::query("DELETE FROM order_items WHERE order_id = $1")
            .bind(&root.id)
            .execute(&mut *tx)
            .await?;

        Self::insert_items(&mut tx, order).await?;

        sqlx::query("UPDATE orders SET customer_id = $2, total = $3 WHERE id = $1")
            .bind(&root.id)
            .bind(&root.customer_id)
            .bind(root.total)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        metrics::counter!("repository_orders_updated").increment(1);
        Ok(())
    }

    async fn find(&self, id: &OrderId) -> Result<Order> {
        let sql = format!("{SELECT_ORDERS_WITH_ITEMS} WHERE o.id = $1");
        let rows = sqlx::query(&sql)
            .bind(id.as_str())
            .fetch_all(&self.pool)
            .await?;

        Self::collect_orders(rows)?
            .into_iter()
            .next()
            .ok_or(RepositoryError::NotFound)
    }

    async fn find_all(&self) -> Result<Vec<Order>> {
        let rows = sqlx::query(SELECT_ORDERS_WITH_ITEMS)
            .fetch_all(&self.pool)
            .await?;

        Self::collect_orders(rows)
    }
}
