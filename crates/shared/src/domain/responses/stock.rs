use crate::model::product::StockModel;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StockLevelResponse {
    pub product_id: i32,
    pub units_available: i64,
}

impl From<StockModel> for StockLevelResponse {
    fn from(value: StockModel) -> Self {
        StockLevelResponse {
            product_id: value.product_id,
            units_available: value.units_available,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StockCheckResponse {
    pub ok: bool,
    pub product_id: i32,
    pub requested: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    pub message: String,
}
