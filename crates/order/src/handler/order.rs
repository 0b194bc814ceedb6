use crate::state::AppState;
use axum::{
    Json,
    extract::{Extension, Path, Query},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use shared::{
    abstract_trait::order::service::{command::DynOrderCommandService, query::DynOrderQueryService},
    domain::{
        requests::{CreateOrderRequest, CurrentUser, FindAllOrders},
        responses::{ApiResponse, OrderResponse},
    },
    errors::{AppErrorHttp, ErrorResponse},
    middleware::{jwt, validate::SimpleValidatedJson},
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up")),
    tag = "Health"
)]
pub async fn health_checker_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "success",
        "message": "Order service is running"
    }))
}

#[utoipa::path(
    post,
    path = "/orders",
    tag = "Order",
    security(("bearer_auth" = [])),
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order confirmed", body = ApiResponse<OrderResponse>),
        (status = 400, description = "Empty or invalid order", body = ErrorResponse),
        (status = 404, description = "Unknown product", body = ErrorResponse),
        (status = 409, description = "Insufficient stock", body = ErrorResponse),
        (status = 503, description = "Product service unavailable", body = ErrorResponse)
    )
)]
pub async fn create_order(
    Extension(service): Extension<DynOrderCommandService>,
    Extension(user): Extension<CurrentUser>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateOrderRequest>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let response = service.create(&user, &body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    get,
    path = "/orders",
    tag = "Order",
    security(("bearer_auth" = [])),
    params(FindAllOrders),
    responses(
        (status = 200, description = "Orders, newest first", body = ApiResponse<Vec<OrderResponse>>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    )
)]
pub async fn get_orders(
    Extension(service): Extension<DynOrderQueryService>,
    Extension(user): Extension<CurrentUser>,
    Query(params): Query<FindAllOrders>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let response = service.find_all(&user, &params).await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/orders/{id}",
    tag = "Order",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order details", body = ApiResponse<OrderResponse>),
        (status = 403, description = "Not the owner", body = ErrorResponse),
        (status = 404, description = "Order not found", body = ErrorResponse)
    )
)]
pub async fn get_order(
    Extension(service): Extension<DynOrderQueryService>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let response = service.find_by_id(&user, id).await?;
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/orders/{id}/cancel",
    tag = "Order",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order cancelled", body = ApiResponse<OrderResponse>),
        (status = 403, description = "Not the owner", body = ErrorResponse),
        (status = 404, description = "Order not found", body = ErrorResponse),
        (status = 409, description = "Order already cancelled", body = ErrorResponse)
    )
)]
pub async fn cancel_order(
    Extension(service): Extension<DynOrderCommandService>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let response = service.cancel(&user, id).await?;
    Ok(Json(response))
}

pub fn order_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    let public_routes = OpenApiRouter::new().route("/health", get(health_checker_handler));

    let private_routes = OpenApiRouter::new()
        .route("/orders", post(create_order).get(get_orders))
        .route("/orders/{id}", get(get_order))
        .route("/orders/{id}/cancel", post(cancel_order))
        .route_layer(middleware::from_fn(jwt::auth))
        .layer(Extension(app_state.di_container.order_command.clone()))
        .layer(Extension(app_state.di_container.order_query.clone()))
        .layer(Extension(app_state.jwt_config.clone()));

    public_routes.merge(private_routes)
}
