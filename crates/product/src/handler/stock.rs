use crate::state::AppState;
use axum::{
    Json,
    extract::{Extension, Path, Query},
    middleware,
    response::IntoResponse,
    routing::{get, patch},
};
use shared::{
    abstract_trait::stock::service::DynStockService,
    domain::{
        requests::{CurrentUser, StockAdjustQuery, StockCheckQuery},
        responses::{ApiResponse, StockCheckResponse, StockLevelResponse},
    },
    errors::{AppErrorHttp, ErrorResponse},
    middleware::jwt,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    patch,
    path = "/stock/{id}/increase",
    tag = "Stock",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Product ID"), StockAdjustQuery),
    responses(
        (status = 200, description = "New stock level", body = ApiResponse<StockLevelResponse>),
        (status = 403, description = "Admin or service token required", body = ErrorResponse),
        (status = 404, description = "Stock not found", body = ErrorResponse)
    )
)]
pub async fn increase_stock(
    Extension(service): Extension<DynStockService>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i32>,
    Query(params): Query<StockAdjustQuery>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let response = service.increase(&user, id, params.amount).await?;
    Ok(Json(response))
}

#[utoipa::path(
    patch,
    path = "/stock/{id}/decrease",
    tag = "Stock",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Product ID"), StockAdjustQuery),
    responses(
        (status = 200, description = "New stock level", body = ApiResponse<StockLevelResponse>),
        (status = 403, description = "Admin or service token required", body = ErrorResponse),
        (status = 404, description = "Stock not found", body = ErrorResponse),
        (status = 409, description = "Insufficient stock", body = ErrorResponse)
    )
)]
pub async fn decrease_stock(
    Extension(service): Extension<DynStockService>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i32>,
    Query(params): Query<StockAdjustQuery>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let response = service.decrease(&user, id, params.amount).await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/stock/check",
    tag = "Stock",
    security(("bearer_auth" = [])),
    params(StockCheckQuery),
    responses(
        (status = 200, description = "Availability for the requested quantity", body = ApiResponse<StockCheckResponse>),
        (status = 404, description = "Product not found", body = ErrorResponse)
    )
)]
pub async fn check_stock(
    Extension(service): Extension<DynStockService>,
    Query(params): Query<StockCheckQuery>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let response = service.check(params.product_id, params.qty).await?;
    Ok(Json(response))
}

pub fn stock_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/stock/check", get(check_stock))
        .route("/stock/{id}/increase", patch(increase_stock))
        .route("/stock/{id}/decrease", patch(decrease_stock))
        .route_layer(middleware::from_fn(jwt::auth))
        .layer(Extension(app_state.di_container.stock.clone()))
        .layer(Extension(app_state.jwt_config.clone()))
}
