use crate::{
    abstract_trait::product::{
        repository::query::DynProductQueryRepository, service::query::ProductQueryServiceTrait,
    },
    domain::responses::{ApiResponse, ProductResponse},
    errors::ServiceError,
};
use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

pub struct ProductQueryService {
    query: DynProductQueryRepository,
}

impl ProductQueryService {
    pub fn new(query: DynProductQueryRepository) -> Self {
        Self { query }
    }
}

#[async_trait]
impl ProductQueryServiceTrait for ProductQueryService {
    async fn find_active(&self) -> Result<ApiResponse<Vec<ProductResponse>>, ServiceError> {
        let products = self.query.find_active().await?;

        info!("📦 Found {} active products", products.len());

        Ok(ApiResponse::success(
            "Products fetched successfully",
            products.into_iter().map(ProductResponse::from).collect(),
        ))
    }

    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        let product = self
            .query
            .find_active_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Product not found".to_string()))?;

        Ok(ApiResponse::success(
            "Product fetched successfully",
            ProductResponse::from(product),
        ))
    }
}
