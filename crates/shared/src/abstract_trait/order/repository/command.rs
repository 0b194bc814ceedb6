use crate::{
    errors::RepositoryError,
    model::order::{OrderStatus, OrderWithItems},
};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

pub type DynOrderCommandRepository = Arc<dyn OrderCommandRepositoryTrait + Send + Sync>;

#[derive(Debug, Clone, PartialEq)]
pub struct NewOrderItem {
    pub product_id: i32,
    pub qty: i32,
    pub unit_price: f64,
}

#[async_trait]
pub trait OrderCommandRepositoryTrait {
    /// Stores a `CREATED` order and its items in one transaction.
    async fn create(
        &self,
        user_id: i32,
        items: &[NewOrderItem],
    ) -> Result<OrderWithItems, RepositoryError>;
    /// Moves the order from `from` to `to` in a single conditional update.
    /// `None` means the order was not in `from`, or does not exist.
    async fn transition(
        &self,
        order_id: i32,
        from: OrderStatus,
        to: OrderStatus,
    ) -> Result<Option<OrderWithItems>, RepositoryError>;
}
