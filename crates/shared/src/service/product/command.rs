use crate::{
    abstract_trait::product::{
        repository::command::DynProductCommandRepository,
        service::command::ProductCommandServiceTrait,
    },
    domain::{
        requests::{CreateProductRequest, CurrentUser, UpdateProductRequest},
        responses::{ApiResponse, ProductResponse},
    },
    errors::{RepositoryError, ServiceError, validation_messages},
};
use anyhow::Result;
use async_trait::async_trait;
use tracing::{error, info, warn};
use validator::Validate;

const DUPLICATE_PRODUCT: &str = "Product with this name and size already exists";

pub struct ProductCommandService {
    command: DynProductCommandRepository,
}

impl ProductCommandService {
    pub fn new(command: DynProductCommandRepository) -> Self {
        Self { command }
    }

    /// The catalogue inserted on first start.
    pub fn default_catalogue() -> Vec<CreateProductRequest> {
        [(3.0, 15000.0, 100), (10.0, 35000.0, 50), (25.0, 70000.0, 20)]
            .into_iter()
            .map(|(size_kg, price, initial_stock)| CreateProductRequest {
                name: "Hielo Bolsa".to_string(),
                size_kg,
                price,
                initial_stock,
            })
            .collect()
    }
}

fn map_write_error(id: Option<i32>, err: RepositoryError) -> ServiceError {
    match err {
        RepositoryError::AlreadyExists(_) => {
            warn!("⚠️ Duplicate product rejected");
            ServiceError::Conflict(DUPLICATE_PRODUCT.to_string())
        }
        RepositoryError::NotFound => ServiceError::NotFound("Product not found".to_string()),
        other => {
            error!("💥 Failed to write product {id:?}: {other:?}");
            ServiceError::Repo(other)
        }
    }
}

#[async_trait]
impl ProductCommandServiceTrait for ProductCommandService {
    async fn create(
        &self,
        user: &CurrentUser,
        req: &CreateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        user.ensure_admin()?;

        if let Err(errors) = req.validate() {
            return Err(ServiceError::Validation(validation_messages(&errors)));
        }

        info!("🆕 Creating product {} ({} kg)", req.name, req.size_kg);

        let product = self
            .command
            .create(req)
            .await
            .map_err(|e| map_write_error(None, e))?;

        info!("✅ Product created: id={}", product.id);

        Ok(ApiResponse::success(
            "Product created successfully",
            ProductResponse::from(product),
        ))
    }

    async fn update(
        &self,
        user: &CurrentUser,
        id: i32,
        req: &UpdateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        user.ensure_admin()?;

        if let Err(errors) = req.validate() {
            return Err(ServiceError::Validation(validation_messages(&errors)));
        }

        info!("🔄 Updating product id={id}");

        let product = self
            .command
            .update(id, req)
            .await
            .map_err(|e| map_write_error(Some(id), e))?;

        info!("✅ Product updated: id={}", product.id);

        Ok(ApiResponse::success(
            "Product updated successfully",
            ProductResponse::from(product),
        ))
    }

    async fn seed_defaults(&self) -> Result<usize, ServiceError> {
        let inserted = self
            .command
            .seed_if_empty(&Self::default_catalogue())
            .await?;

        if inserted > 0 {
            info!("🌱 Seeded {inserted} default products");
        }

        Ok(inserted)
    }
}
