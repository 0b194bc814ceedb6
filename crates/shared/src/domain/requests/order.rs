use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateOrderItemRequest {
    pub product_id: i32,

    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub qty: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateOrderRequest {
    #[validate(nested)]
    pub items: Vec<CreateOrderItemRequest>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct FindAllOrders {
    /// Admins only: include every user's orders.
    #[serde(default)]
    pub all: bool,
}
