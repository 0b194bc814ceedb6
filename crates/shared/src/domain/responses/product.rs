use crate::model::product::ProductModel;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    pub id: i32,
    pub name: String,
    pub size_kg: f64,
    pub price: f64,
    pub is_active: bool,
    pub units_available: i64,
}

impl From<ProductModel> for ProductResponse {
    fn from(value: ProductModel) -> Self {
        ProductResponse {
            id: value.id,
            name: value.name,
            size_kg: value.size_kg,
            price: value.price,
            is_active: value.is_active,
            units_available: value.units_available,
        }
    }
}
