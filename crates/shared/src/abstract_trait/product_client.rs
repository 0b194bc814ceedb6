use crate::{
    domain::responses::{StockCheckResponse, StockLevelResponse},
    errors::ServiceError,
};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

pub type DynProductClient = Arc<dyn ProductClientTrait + Send + Sync>;

/// Calls the product service on behalf of the order service.
#[async_trait]
pub trait ProductClientTrait {
    async fn check_stock(
        &self,
        token: &str,
        product_id: i32,
        qty: i32,
    ) -> Result<StockCheckResponse, ServiceError>;
    async fn decrease_stock(
        &self,
        token: &str,
        product_id: i32,
        amount: i32,
    ) -> Result<StockLevelResponse, ServiceError>;
    async fn increase_stock(
        &self,
        token: &str,
        product_id: i32,
        amount: i32,
    ) -> Result<StockLevelResponse, ServiceError>;
}
