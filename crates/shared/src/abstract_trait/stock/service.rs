use crate::{
    domain::{
        requests::CurrentUser,
        responses::{ApiResponse, StockCheckResponse, StockLevelResponse},
    },
    errors::ServiceError,
};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

pub type DynStockService = Arc<dyn StockServiceTrait + Send + Sync>;

#[async_trait]
pub trait StockServiceTrait {
    async fn increase(
        &self,
        user: &CurrentUser,
        product_id: i32,
        amount: i64,
    ) -> Result<ApiResponse<StockLevelResponse>, ServiceError>;
    async fn decrease(
        &self,
        user: &CurrentUser,
        product_id: i32,
        amount: i64,
    ) -> Result<ApiResponse<StockLevelResponse>, ServiceError>;
    async fn check(
        &self,
        product_id: i32,
        qty: i64,
    ) -> Result<ApiResponse<StockCheckResponse>, ServiceError>;
}
