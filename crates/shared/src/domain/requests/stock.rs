use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Debug, Deserialize, IntoParams)]
pub struct StockAdjustQuery {
    pub amount: i64,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct StockCheckQuery {
    pub product_id: i32,
    pub qty: i64,
}
