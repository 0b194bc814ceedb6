use crate::{
    abstract_trait::stock::repository::StockRepositoryTrait, config::ConnectionPool,
    errors::RepositoryError, model::product::StockModel,
};
use anyhow::Result;
use async_trait::async_trait;
use tracing::error;

#[derive(Clone)]
pub struct StockRepository {
    db_pool: ConnectionPool,
}

impl StockRepository {
    pub fn new(db_pool: ConnectionPool) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl StockRepositoryTrait for StockRepository {
    async fn find_by_product_id(
        &self,
        product_id: i32,
    ) -> Result<Option<StockModel>, RepositoryError> {
        sqlx::query_as::<_, StockModel>(
            "SELECT product_id, units_available FROM stock WHERE product_id = ?1",
        )
        .bind(product_id)
        .fetch_optional(&self.db_pool)
        .await
        .map_err(|e| {
            error!("❌ Database error in find stock for product {product_id}: {e:?}");
            RepositoryError::from(e)
        })
    }

    async fn increase(&self, product_id: i32, amount: i64) -> Result<StockModel, RepositoryError> {
        sqlx::query_as::<_, StockModel>(
            r#"
            UPDATE stock
            SET units_available = units_available + ?2
            WHERE product_id = ?1
            RETURNING product_id, units_available
            "#,
        )
        .bind(product_id)
        .bind(amount)
        .fetch_optional(&self.db_pool)
        .await
        .map_err(|e| {
            error!("❌ Database error in increase stock for product {product_id}: {e:?}");
            RepositoryError::from(e)
        })?
        .ok_or(RepositoryError::NotFound)
    }

    async fn decrease(&self, product_id: i32, amount: i64) -> Result<StockModel, RepositoryError> {
        let updated = sqlx::query_as::<_, StockModel>(
            r#"
            UPDATE stock
            SET units_available = units_available - ?2
            WHERE product_id = ?1 AND units_available >= ?2
            RETURNING product_id, units_available
            "#,
        )
        .bind(product_id)
        .bind(amount)
        .fetch_optional(&self.db_pool)
        .await
        .map_err(|e| {
            error!("❌ Database error in decrease stock for product {product_id}: {e:?}");
            RepositoryError::from(e)
        })?;

        match updated {
            Some(stock) => Ok(stock),
            None => match self.find_by_product_id(product_id).await? {
                Some(_) => Err(RepositoryError::Conflict("Insufficient stock".to_string())),
                None => Err(RepositoryError::NotFound),
            },
        }
    }
}
