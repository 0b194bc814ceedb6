use super::PRODUCT_SELECT;
use crate::{
    abstract_trait::product::repository::query::ProductQueryRepositoryTrait,
    config::ConnectionPool, errors::RepositoryError, model::product::ProductModel,
};
use anyhow::Result;
use async_trait::async_trait;
use tracing::error;

#[derive(Clone)]
pub struct ProductQueryRepository {
    db_pool: ConnectionPool,
}

impl ProductQueryRepository {
    pub fn new(db_pool: ConnectionPool) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for ProductQueryRepository {
    async fn find_active(&self) -> Result<Vec<ProductModel>, RepositoryError> {
        let sql = format!("{PRODUCT_SELECT} WHERE p.is_active = 1 ORDER BY p.id");

        sqlx::query_as::<_, ProductModel>(&sql)
            .fetch_all(&self.db_pool)
            .await
            .map_err(|e| {
                error!("❌ Database error in find_active products: {e:?}");
                RepositoryError::from(e)
            })
    }

    async fn find_active_by_id(&self, id: i32) -> Result<Option<ProductModel>, RepositoryError> {
        let sql = format!("{PRODUCT_SELECT} WHERE p.id = ?1 AND p.is_active = 1");

        sqlx::query_as::<_, ProductModel>(&sql)
            .bind(id)
            .fetch_optional(&self.db_pool)
            .await
            .map_err(|e| {
                error!("❌ Database error in find_active_by_id product: {e:?}");
                RepositoryError::from(e)
            })
    }
}
