use crate::{
    domain::{
        requests::{CreateOrderRequest, CurrentUser},
        responses::{ApiResponse, OrderResponse},
    },
    errors::ServiceError,
};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

pub type DynOrderCommandService = Arc<dyn OrderCommandServiceTrait + Send + Sync>;

#[async_trait]
pub trait OrderCommandServiceTrait {
    async fn create(
        &self,
        user: &CurrentUser,
        req: &CreateOrderRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError>;
    async fn cancel(
        &self,
        user: &CurrentUser,
        order_id: i32,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError>;
}
