use crate::{
    domain::{
        requests::{CurrentUser, FindAllOrders},
        responses::{ApiResponse, OrderResponse},
    },
    errors::ServiceError,
};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

pub type DynOrderQueryService = Arc<dyn OrderQueryServiceTrait + Send + Sync>;

#[async_trait]
pub trait OrderQueryServiceTrait {
    async fn find_all(
        &self,
        user: &CurrentUser,
        req: &FindAllOrders,
    ) -> Result<ApiResponse<Vec<OrderResponse>>, ServiceError>;
    async fn find_by_id(
        &self,
        user: &CurrentUser,
        id: i32,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError>;
}
