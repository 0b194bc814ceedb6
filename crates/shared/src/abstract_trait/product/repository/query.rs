use crate::{errors::RepositoryError, model::product::ProductModel};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

pub type DynProductQueryRepository = Arc<dyn ProductQueryRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait ProductQueryRepositoryTrait {
    async fn find_active(&self) -> Result<Vec<ProductModel>, RepositoryError>;
    async fn find_active_by_id(&self, id: i32) -> Result<Option<ProductModel>, RepositoryError>;
}
