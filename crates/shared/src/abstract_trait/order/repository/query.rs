use crate::{errors::RepositoryError, model::order::OrderWithItems};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

pub type DynOrderQueryRepository = Arc<dyn OrderQueryRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait OrderQueryRepositoryTrait {
    /// Newest first. `None` lists every user's orders.
    async fn find_all(
        &self,
        user_id: Option<i32>,
    ) -> Result<Vec<OrderWithItems>, RepositoryError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<OrderWithItems>, RepositoryError>;
}
