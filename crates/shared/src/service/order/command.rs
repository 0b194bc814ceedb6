use crate::{
    abstract_trait::{
        jwt::DynJwtService,
        order::{
            repository::{
                command::{DynOrderCommandRepository, NewOrderItem},
                query::DynOrderQueryRepository,
            },
            service::command::OrderCommandServiceTrait,
        },
        product_client::DynProductClient,
    },
    domain::{
        requests::{CreateOrderRequest, CurrentUser},
        responses::{ApiResponse, OrderResponse},
    },
    errors::{ServiceError, validation_messages},
    model::{
        order::{OrderStatus, OrderWithItems},
        role::Role,
    },
};
use anyhow::Result;
use async_trait::async_trait;
use tracing::{error, info, warn};
use validator::Validate;

pub struct OrderCommandService {
    command: DynOrderCommandRepository,
    query: DynOrderQueryRepository,
    products: DynProductClient,
    jwt_config: DynJwtService,
}

impl OrderCommandService {
    pub fn new(
        command: DynOrderCommandRepository,
        query: DynOrderQueryRepository,
        products: DynProductClient,
        jwt_config: DynJwtService,
    ) -> Self {
        Self {
            command,
            query,
            products,
            jwt_config,
        }
    }

    /// Token the product service accepts for stock mutations on behalf of `user`.
    fn service_token(&self, user: &CurrentUser) -> Result<String, ServiceError> {
        self.jwt_config.generate_token(user.id, Role::Service)
    }

    async fn priced_items(
        &self,
        token: &str,
        req: &CreateOrderRequest,
    ) -> Result<Vec<NewOrderItem>, ServiceError> {
        let mut items = Vec::with_capacity(req.items.len());

        for item in &req.items {
            let check = self
                .products
                .check_stock(token, item.product_id, item.qty)
                .await?;

            if !check.ok {
                return Err(ServiceError::Conflict(format!(
                    "Insufficient stock for product_id={}: requested {}, available {}",
                    item.product_id,
                    item.qty,
                    check.available.unwrap_or(0)
                )));
            }

            let unit_price = check.price.ok_or_else(|| {
                ServiceError::Upstream(format!(
                    "Product service returned no price for product_id={}",
                    item.product_id
                ))
            })?;

            items.push(NewOrderItem {
                product_id: item.product_id,
                qty: item.qty,
                unit_price,
            });
        }

        Ok(items)
    }

    async fn release(&self, token: &str, order_id: i32, items: &[NewOrderItem]) {
        for item in items {
            if let Err(e) = self
                .products
                .increase_stock(token, item.product_id, item.qty)
                .await
            {
                error!(
                    "💥 Failed to release {} units of product {} for order {order_id}: {e}",
                    item.qty, item.product_id
                );
            }
        }
    }

    /// Reserves every item; on failure returns what was already reserved so it can be released.
    async fn reserve(
        &self,
        token: &str,
        items: &[NewOrderItem],
    ) -> Result<(), (Vec<NewOrderItem>, ServiceError)> {
        let mut reserved = Vec::with_capacity(items.len());

        for item in items {
            match self
                .products
                .decrease_stock(token, item.product_id, item.qty)
                .await
            {
                Ok(_) => reserved.push(item.clone()),
                Err(e) => return Err((reserved, e)),
            }
        }

        Ok(())
    }
}

#[async_trait]
impl OrderCommandServiceTrait for OrderCommandService {
    async fn create(
        &self,
        user: &CurrentUser,
        req: &CreateOrderRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        if req.items.is_empty() {
            return Err(ServiceError::BadRequest("Order has no items".to_string()));
        }

        if let Err(errors) = req.validate() {
            return Err(ServiceError::Validation(validation_messages(&errors)));
        }

        info!(
            "🛒 Creating order for user_id={} with {} items",
            user.id,
            req.items.len()
        );

        let token = self.service_token(user)?;
        let items = self.priced_items(&token, req).await?;
        let order = self.command.create(user.id, &items).await?;
        let order_id = order.order.id;

        if let Err((reserved, err)) = self.reserve(&token, &items).await {
            warn!("↩️ Reservation for order {order_id} failed, compensating: {err}");

            self.release(&token, order_id, &reserved).await;

            match self
                .command
                .transition(order_id, OrderStatus::Created, OrderStatus::Cancelled)
                .await
            {
                Ok(Some(_)) => {}
                Ok(None) => warn!("⚠️ Order {order_id} left CREATED before compensation"),
                Err(e) => error!(
                    "💥 Failed to cancel order {order_id} after reservation failure: {e:?}"
                ),
            }

            return Err(err);
        }

        let order = self
            .command
            .transition(order_id, OrderStatus::Created, OrderStatus::Confirmed)
            .await?
            .ok_or_else(|| {
                ServiceError::Conflict(format!("Order {order_id} changed status while confirming"))
            })?;

        info!(
            "✅ Order {order_id} confirmed, total={}",
            order.order.total_amount
        );

        Ok(ApiResponse::success(
            "Order created successfully",
            OrderResponse::from(order),
        ))
    }

    async fn cancel(
        &self,
        user: &CurrentUser,
        order_id: i32,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        let OrderWithItems { order, .. } = self
            .query
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Order not found".to_string()))?;

        if !user.can_access(order.user_id) {
            warn!(
                "🚫 user_id={} tried to cancel order {order_id} of user_id={}",
                user.id, order.user_id
            );
            return Err(ServiceError::Forbidden("Forbidden".to_string()));
        }

        let token = self.service_token(user)?;

        // Only one caller wins the claim; the loser sees the status it lost to.
        let Some(cancelled) = self
            .command
            .transition(order_id, OrderStatus::Confirmed, OrderStatus::Cancelled)
            .await?
        else {
            let status = self
                .query
                .find_by_id(order_id)
                .await?
                .map(|o| o.order.status)
                .ok_or_else(|| ServiceError::NotFound("Order not found".to_string()))?;

            return Err(ServiceError::Conflict(format!(
                "Order cannot be cancelled in status {status}"
            )));
        };

        let restock: Vec<NewOrderItem> = cancelled
            .items
            .iter()
            .map(|item| NewOrderItem {
                product_id: item.product_id,
                qty: item.qty,
                unit_price: item.unit_price,
            })
            .collect();

        self.release(&token, order_id, &restock).await;

        info!("🗑️ Order {order_id} cancelled by user_id={}", user.id);

        Ok(ApiResponse::success(
            "Order cancelled successfully",
            OrderResponse::from(cancelled),
        ))
    }
}
