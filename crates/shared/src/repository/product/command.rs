use super::PRODUCT_SELECT;
use crate::{
    abstract_trait::product::repository::command::ProductCommandRepositoryTrait,
    config::ConnectionPool,
    domain::requests::{CreateProductRequest, UpdateProductRequest},
    errors::RepositoryError,
    model::product::ProductModel,
};
use anyhow::Result;
use async_trait::async_trait;
use sqlx::SqliteConnection;
use tracing::{error, info};

#[derive(Clone)]
pub struct ProductCommandRepository {
    db_pool: ConnectionPool,
}

impl ProductCommandRepository {
    pub fn new(db_pool: ConnectionPool) -> Self {
        Self { db_pool }
    }

    async fn insert_with_stock(
        conn: &mut SqliteConnection,
        req: &CreateProductRequest,
    ) -> Result<i32, RepositoryError> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO products (name, size_kg, price, is_active, created_at, updated_at)
            VALUES (?1, ?2, ?3, 1, CURRENT_TIMESTAMP, CURRENT_TIMESTAMP)
            RETURNING id
            "#,
        )
        .bind(&req.name)
        .bind(req.size_kg)
        .bind(req.price)
        .fetch_one(&mut *conn)
        .await?;

        sqlx::query("INSERT INTO stock (product_id, units_available) VALUES (?1, ?2)")
            .bind(id)
            .bind(req.initial_stock)
            .execute(&mut *conn)
            .await?;

        Ok(id)
    }

    async fn fetch(conn: &mut SqliteConnection, id: i32) -> Result<ProductModel, RepositoryError> {
        let sql = format!("{PRODUCT_SELECT} WHERE p.id = ?1");

        Ok(sqlx::query_as::<_, ProductModel>(&sql)
            .bind(id)
            .fetch_one(&mut *conn)
            .await?)
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for ProductCommandRepository {
    async fn create(&self, req: &CreateProductRequest) -> Result<ProductModel, RepositoryError> {
        let mut tx = self.db_pool.begin().await?;

        let id = Self::insert_with_stock(&mut tx, req).await.map_err(|e| {
            error!("❌ Database error in create product {}: {e:?}", req.name);
            e
        })?;
        let product = Self::fetch(&mut tx, id).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn update(
        &self,
        id: i32,
        req: &UpdateProductRequest,
    ) -> Result<ProductModel, RepositoryError> {
        let mut tx = self.db_pool.begin().await?;

        let updated: Option<i32> = sqlx::query_scalar(
            r#"
            UPDATE products
            SET
                name = COALESCE(?2, name),
                size_kg = COALESCE(?3, size_kg),
                price = COALESCE(?4, price),
                is_active = COALESCE(?5, is_active),
                updated_at = CURRENT_TIMESTAMP
            WHERE id = ?1
            RETURNING id
            "#,
        )
        .bind(id)
        .bind(req.name.as_deref())
        .bind(req.size_kg)
        .bind(req.price)
        .bind(req.is_active)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| {
            error!("❌ Database error in update product {id}: {e:?}");
            RepositoryError::from(e)
        })?;

        let Some(id) = updated else {
            return Err(RepositoryError::NotFound);
        };

        let product = Self::fetch(&mut tx, id).await?;
        tx.commit().await?;

        Ok(product)
    }

    async fn seed_if_empty(
        &self,
        products: &[CreateProductRequest],
    ) -> Result<usize, RepositoryError> {
        let mut tx = self.db_pool.begin().await?;

        let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&mut *tx)
            .await?;

        if existing > 0 {
            info!("🌱 Catalogue already has {existing} products, skipping seed");
            return Ok(0);
        }

        for product in products {
            Self::insert_with_stock(&mut tx, product).await?;
        }

        tx.commit().await?;

        Ok(products.len())
    }
}
