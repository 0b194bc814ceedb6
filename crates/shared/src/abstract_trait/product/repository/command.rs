use crate::{
    domain::requests::{CreateProductRequest, UpdateProductRequest},
    errors::RepositoryError,
    model::product::ProductModel,
};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

pub type DynProductCommandRepository = Arc<dyn ProductCommandRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait ProductCommandRepositoryTrait {
    /// Inserts the product and its stock row in one transaction.
    async fn create(&self, req: &CreateProductRequest) -> Result<ProductModel, RepositoryError>;
    async fn update(
        &self,
        id: i32,
        req: &UpdateProductRequest,
    ) -> Result<ProductModel, RepositoryError>;
    /// Inserts `products` only when the catalogue is empty; returns how many were added.
    async fn seed_if_empty(
        &self,
        products: &[CreateProductRequest],
    ) -> Result<usize, RepositoryError>;
}
