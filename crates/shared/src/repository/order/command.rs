use super::load_items;
use crate::{
    abstract_trait::order::repository::command::{NewOrderItem, OrderCommandRepositoryTrait},
    config::ConnectionPool,
    errors::RepositoryError,
    model::order::{OrderModel, OrderStatus, OrderWithItems},
};
use anyhow::Result;
use async_trait::async_trait;
use tracing::error;

#[derive(Clone)]
pub struct OrderCommandRepository {
    db_pool: ConnectionPool,
}

impl OrderCommandRepository {
    pub fn new(db_pool: ConnectionPool) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl OrderCommandRepositoryTrait for OrderCommandRepository {
    async fn create(
        &self,
        user_id: i32,
        items: &[NewOrderItem],
    ) -> Result<OrderWithItems, RepositoryError> {
        let total: f64 = items
            .iter()
            .map(|it| it.unit_price * f64::from(it.qty))
            .sum();

        let mut tx = self.db_pool.begin().await?;

        let order = sqlx::query_as::<_, OrderModel>(
            r#"
            INSERT INTO orders (user_id, status, total_amount, created_at, updated_at)
            VALUES (?1, ?2, ?3, CURRENT_TIMESTAMP, CURRENT_TIMESTAMP)
            RETURNING id, user_id, status, total_amount, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(OrderStatus::Created.as_str())
        .bind(total)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            error!("❌ Database error in create order for user {user_id}: {e:?}");
            RepositoryError::from(e)
        })?;

        for item in items {
            sqlx::query(
                r#"
                INSERT INTO order_items (order_id, product_id, qty, unit_price)
                VALUES (?1, ?2, ?3, ?4)
                "#,
            )
            .bind(order.id)
            .bind(item.product_id)
            .bind(item.qty)
            .bind(item.unit_price)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                error!("❌ Database error in create order item: {e:?}");
                RepositoryError::from(e)
            })?;
        }

        let created = load_items(&mut tx, order).await?;
        tx.commit().await?;

        Ok(created)
    }

    async fn transition(
        &self,
        order_id: i32,
        from: OrderStatus,
        to: OrderStatus,
    ) -> Result<Option<OrderWithItems>, RepositoryError> {
        let mut conn = self.db_pool.acquire().await?;

        let order = sqlx::query_as::<_, OrderModel>(
            r#"
            UPDATE orders
            SET status = ?3, updated_at = CURRENT_TIMESTAMP
            WHERE id = ?1 AND status = ?2
            RETURNING id, user_id, status, total_amount, created_at, updated_at
            "#,
        )
        .bind(order_id)
        .bind(from.as_str())
        .bind(to.as_str())
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| {
            error!(
                "❌ Database error moving order {order_id} from {} to {}: {e:?}",
                from.as_str(),
                to.as_str()
            );
            RepositoryError::from(e)
        })?;

        match order {
            Some(order) => Ok(Some(load_items(&mut conn, order).await?)),
            None => Ok(None),
        }
    }
}
