use crate::{
    abstract_trait::{
        product::repository::query::DynProductQueryRepository,
        stock::{repository::DynStockRepository, service::StockServiceTrait},
    },
    domain::{
        requests::CurrentUser,
        responses::{ApiResponse, StockCheckResponse, StockLevelResponse},
    },
    errors::{RepositoryError, ServiceError},
};
use anyhow::Result;
use async_trait::async_trait;
use tracing::{info, warn};

const STOCK_NOT_FOUND: &str = "Stock not found";
const INSUFFICIENT_STOCK: &str = "Insufficient stock";

pub struct StockService {
    stock: DynStockRepository,
    products: DynProductQueryRepository,
}

impl StockService {
    pub fn new(stock: DynStockRepository, products: DynProductQueryRepository) -> Self {
        Self { stock, products }
    }
}

fn map_stock_error(err: RepositoryError) -> ServiceError {
    match err {
        RepositoryError::NotFound => ServiceError::NotFound(STOCK_NOT_FOUND.to_string()),
        RepositoryError::Conflict(msg) => ServiceError::Conflict(msg),
        other => ServiceError::Repo(other),
    }
}

#[async_trait]
impl StockServiceTrait for StockService {
    async fn increase(
        &self,
        user: &CurrentUser,
        product_id: i32,
        amount: i64,
    ) -> Result<ApiResponse<StockLevelResponse>, ServiceError> {
        user.ensure_stock_operator()?;

        let stock = self
            .stock
            .increase(product_id, amount.max(0))
            .await
            .map_err(map_stock_error)?;

        info!(
            "📈 Stock for product {product_id} increased by {} to {}",
            amount.max(0),
            stock.units_available
        );

        Ok(ApiResponse::success(
            "Stock increased",
            StockLevelResponse::from(stock),
        ))
    }

    async fn decrease(
        &self,
        user: &CurrentUser,
        product_id: i32,
        amount: i64,
    ) -> Result<ApiResponse<StockLevelResponse>, ServiceError> {
        user.ensure_stock_operator()?;

        if amount <= 0 {
            if self.stock.find_by_product_id(product_id).await?.is_none() {
                return Err(ServiceError::NotFound(STOCK_NOT_FOUND.to_string()));
            }
            return Err(ServiceError::Conflict(INSUFFICIENT_STOCK.to_string()));
        }

        let stock = self
            .stock
            .decrease(product_id, amount)
            .await
            .map_err(|e| {
                warn!("📉 Stock decrease of {amount} for product {product_id} rejected: {e}");
                map_stock_error(e)
            })?;

        info!(
            "📉 Stock for product {product_id} decreased by {amount} to {}",
            stock.units_available
        );

        Ok(ApiResponse::success(
            "Stock decreased",
            StockLevelResponse::from(stock),
        ))
    }

    async fn check(
        &self,
        product_id: i32,
        qty: i64,
    ) -> Result<ApiResponse<StockCheckResponse>, ServiceError> {
        if qty <= 0 {
            return Ok(ApiResponse::success(
                "Stock checked",
                StockCheckResponse {
                    ok: false,
                    product_id,
                    requested: qty,
                    available: None,
                    price: None,
                    message: "Quantity must be greater than zero".to_string(),
                },
            ));
        }

        let product = self
            .products
            .find_active_by_id(product_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Product not found".to_string()))?;

        let ok = product.units_available >= qty;
        let message = if ok {
            "Stock available".to_string()
        } else {
            format!(
                "Insufficient stock: requested {qty}, available {}",
                product.units_available
            )
        };

        Ok(ApiResponse::success(
            "Stock checked",
            StockCheckResponse {
                ok,
                product_id,
                requested: qty,
                available: Some(product.units_available),
                price: Some(product.price),
                message,
            },
        ))
    }
}
