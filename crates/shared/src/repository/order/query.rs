use super::{ORDER_SELECT, load_items};
use crate::{
    abstract_trait::order::repository::query::OrderQueryRepositoryTrait,
    config::ConnectionPool,
    errors::RepositoryError,
    model::order::{OrderItemModel, OrderModel, OrderWithItems},
};
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use tracing::error;

#[derive(Clone)]
pub struct OrderQueryRepository {
    db_pool: ConnectionPool,
}

impl OrderQueryRepository {
    pub fn new(db_pool: ConnectionPool) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl OrderQueryRepositoryTrait for OrderQueryRepository {
    async fn find_all(
        &self,
        user_id: Option<i32>,
    ) -> Result<Vec<OrderWithItems>, RepositoryError> {
        let mut conn = self.db_pool.acquire().await?;

        let orders = sqlx::query_as::<_, OrderModel>(&format!(
            "{ORDER_SELECT} WHERE (?1 IS NULL OR user_id = ?1) ORDER BY created_at DESC, id DESC"
        ))
        .bind(user_id)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Database error in find_all orders: {e:?}");
            RepositoryError::from(e)
        })?;

        let items = sqlx::query_as::<_, OrderItemModel>(
            r#"
            SELECT i.id, i.order_id, i.product_id, i.qty, i.unit_price
            FROM order_items i
            JOIN orders o ON o.id = i.order_id
            WHERE (?1 IS NULL OR o.user_id = ?1)
            ORDER BY i.id
            "#,
        )
        .bind(user_id)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Database error in find_all order items: {e:?}");
            RepositoryError::from(e)
        })?;

        let mut by_order: HashMap<i32, Vec<OrderItemModel>> = HashMap::new();
        for item in items {
            by_order.entry(item.order_id).or_default().push(item);
        }

        Ok(orders
            .into_iter()
            .map(|order| {
                let items = by_order.remove(&order.id).unwrap_or_default();
                OrderWithItems { order, items }
            })
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<OrderWithItems>, RepositoryError> {
        let mut conn = self.db_pool.acquire().await?;

        let order = sqlx::query_as::<_, OrderModel>(&format!("{ORDER_SELECT} WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Database error in find_by_id order {id}: {e:?}");
                RepositoryError::from(e)
            })?;

        match order {
            Some(order) => Ok(Some(load_items(&mut conn, order).await?)),
            None => Ok(None),
        }
    }
}
