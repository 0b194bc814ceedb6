use crate::model::order::{OrderItemModel, OrderWithItems};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderItemResponse {
    pub product_id: i32,
    pub qty: i32,
    pub unit_price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderResponse {
    pub id: i32,
    pub user_id: i32,
    pub status: String,
    pub total_amount: f64,
    pub items: Vec<OrderItemResponse>,
    pub created_at: Option<String>,
}

impl From<OrderItemModel> for OrderItemResponse {
    fn from(value: OrderItemModel) -> Self {
        OrderItemResponse {
            product_id: value.product_id,
            qty: value.qty,
            unit_price: value.unit_price,
        }
    }
}

impl From<OrderWithItems> for OrderResponse {
    fn from(value: OrderWithItems) -> Self {
        let OrderWithItems { order, items } = value;

        OrderResponse {
            id: order.id,
            user_id: order.user_id,
            status: order.status,
            total_amount: (order.total_amount * 100.0).round() / 100.0,
            items: items.into_iter().map(OrderItemResponse::from).collect(),
            created_at: order
                .created_at
                .map(|dt| dt.format("%Y-%m-%dT%H:%M:%S").to_string()),
        }
    }
}
