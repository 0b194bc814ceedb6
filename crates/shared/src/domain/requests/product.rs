use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(range(exclusive_min = 0.0, message = "Size must be positive"))]
    pub size_kg: f64,

    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub price: f64,

    #[serde(default)]
    #[validate(range(min = 0, message = "Initial stock cannot be negative"))]
    pub initial_stock: i64,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,

    #[validate(range(exclusive_min = 0.0, message = "Size must be positive"))]
    pub size_kg: Option<f64>,

    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub price: Option<f64>,

    pub is_active: Option<bool>,
}
