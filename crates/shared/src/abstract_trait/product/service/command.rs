use crate::{
    domain::{
        requests::{CreateProductRequest, CurrentUser, UpdateProductRequest},
        responses::{ApiResponse, ProductResponse},
    },
    errors::ServiceError,
};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

pub type DynProductCommandService = Arc<dyn ProductCommandServiceTrait + Send + Sync>;

#[async_trait]
pub trait ProductCommandServiceTrait {
    async fn create(
        &self,
        user: &CurrentUser,
        req: &CreateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError>;
    async fn update(
        &self,
        user: &CurrentUser,
        id: i32,
        req: &UpdateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError>;
    async fn seed_defaults(&self) -> Result<usize, ServiceError>;
}
