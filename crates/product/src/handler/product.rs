use crate::state::AppState;
use axum::{
    Json,
    extract::{Extension, Path},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, put},
};
use shared::{
    abstract_trait::product::service::{
        command::DynProductCommandService, query::DynProductQueryService,
    },
    domain::{
        requests::{CreateProductRequest, CurrentUser, UpdateProductRequest},
        responses::{ApiResponse, ProductResponse},
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
        "message": "Product service is running"
    }))
}

#[utoipa::path(
    get,
    path = "/products",
    tag = "Product",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Active products", body = ApiResponse<Vec<ProductResponse>>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    )
)]
pub async fn get_products(
    Extension(service): Extension<DynProductQueryService>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let response = service.find_active().await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "Product",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product details", body = ApiResponse<ProductResponse>),
        (status = 404, description = "Product not found", body = ErrorResponse)
    )
)]
pub async fn get_product(
    Extension(service): Extension<DynProductQueryService>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let response = service.find_by_id(id).await?;
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/products",
    tag = "Product",
    security(("bearer_auth" = [])),
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = ApiResponse<ProductResponse>),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 403, description = "Admin only", body = ErrorResponse),
        (status = 409, description = "Duplicate name and size", body = ErrorResponse)
    )
)]
pub async fn create_product(
    Extension(service): Extension<DynProductCommandService>,
    Extension(user): Extension<CurrentUser>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateProductRequest>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let response = service.create(&user, &body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    put,
    path = "/products/{id}",
    tag = "Product",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Product ID")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated", body = ApiResponse<ProductResponse>),
        (status = 403, description = "Admin only", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse),
        (status = 409, description = "Duplicate name and size", body = ErrorResponse)
    )
)]
pub async fn update_product(
    Extension(service): Extension<DynProductCommandService>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i32>,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdateProductRequest>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let response = service.update(&user, id, &body).await?;
    Ok(Json(response))
}

pub fn product_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    let public_routes = OpenApiRouter::new().route("/health", get(health_checker_handler));

    let private_routes = OpenApiRouter::new()
        .route("/products", get(get_products).post(create_product))
        .route("/products/{id}", put(update_product).get(get_product))
        .route_layer(middleware::from_fn(jwt::auth))
        .layer(Extension(app_state.di_container.product.query.clone()))
        .layer(Extension(app_state.di_container.product.command.clone()))
        .layer(Extension(app_state.jwt_config.clone()));

    public_routes.merge(private_routes)
}
