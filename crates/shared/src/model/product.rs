use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A catalogue row joined with its stock level.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProductModel {
    pub id: i32,
    pub name: String,
    pub size_kg: f64,
    pub price: f64,
    pub is_active: bool,
    pub units_available: i64,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StockModel {
    pub product_id: i32,
    pub units_available: i64,
}
