use crate::{errors::RepositoryError, model::product::StockModel};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

pub type DynStockRepository = Arc<dyn StockRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait StockRepositoryTrait {
    async fn find_by_product_id(
        &self,
        product_id: i32,
    ) -> Result<Option<StockModel>, RepositoryError>;
    async fn increase(&self, product_id: i32, amount: i64) -> Result<StockModel, RepositoryError>;
    /// Fails with `Conflict` instead of letting the level drop below zero.
    async fn decrease(&self, product_id: i32, amount: i64) -> Result<StockModel, RepositoryError>;
}
