use crate::{
    abstract_trait::order::{
        repository::query::DynOrderQueryRepository, service::query::OrderQueryServiceTrait,
    },
    domain::{
        requests::{CurrentUser, FindAllOrders},
        responses::{ApiResponse, OrderResponse},
    },
    errors::ServiceError,
};
use anyhow::Result;
use async_trait::async_trait;
use tracing::{info, warn};

pub struct OrderQueryService {
    query: DynOrderQueryRepository,
}

impl OrderQueryService {
    pub fn new(query: DynOrderQueryRepository) -> Self {
        Self { query }
    }
}

#[async_trait]
impl OrderQueryServiceTrait for OrderQueryService {
    async fn find_all(
        &self,
        user: &CurrentUser,
        req: &FindAllOrders,
    ) -> Result<ApiResponse<Vec<OrderResponse>>, ServiceError> {
        let owner = if req.all && user.is_admin() {
            None
        } else {
            Some(user.id)
        };

        let orders = self.query.find_all(owner).await?;

        info!(
            "📋 Listed {} orders for user_id={} (all={})",
            orders.len(),
            user.id,
            owner.is_none()
        );

        Ok(ApiResponse::success(
            "Orders fetched successfully",
            orders.into_iter().map(OrderResponse::from).collect(),
        ))
    }

    async fn find_by_id(
        &self,
        user: &CurrentUser,
        id: i32,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        let order = self
            .query
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Order not found".to_string()))?;

        if !user.can_access(order.order.user_id) {
            warn!("🚫 user_id={} tried to read order {id}", user.id);
            return Err(ServiceError::Forbidden("Forbidden".to_string()));
        }

        Ok(ApiResponse::success(
            "Order fetched successfully",
            OrderResponse::from(order),
        ))
    }
}
