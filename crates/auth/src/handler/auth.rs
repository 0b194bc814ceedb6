use crate::state::AppState;
use axum::{
    Extension, Json, middleware,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use shared::{
    abstract_trait::auth::DynAuthService,
    domain::{
        requests::{AuthRequest, CurrentUser, RegisterRequest},
        responses::{ApiResponse, RegisterResponse, TokenResponse, UserResponse},
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
        "message": "Auth service is running"
    }))
}

#[utoipa::path(
    post,
    path = "/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created", body = ApiResponse<RegisterResponse>),
        (status = 400, description = "Invalid input or email already registered", body = ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn register_user_handler(
    Extension(service): Extension<DynAuthService>,
    SimpleValidatedJson(body): SimpleValidatedJson<RegisterRequest>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let response = service.register_user(&body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    post,
    path = "/login",
    request_body = AuthRequest,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<TokenResponse>),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn login_user_handler(
    Extension(service): Extension<DynAuthService>,
    SimpleValidatedJson(body): SimpleValidatedJson<AuthRequest>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let response = service.login_user(&body).await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/me",
    responses(
        (status = 200, description = "Current user", body = ApiResponse<UserResponse>),
        (status = 401, description = "Missing, invalid or stale token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Auth"
)]
pub async fn get_me_handler(
    Extension(service): Extension<DynAuthService>,
    Extension(user): Extension<CurrentUser>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let response = service.get_me(user.id).await?;
    Ok(Json(response))
}

pub fn auth_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    let public_routes = OpenApiRouter::new()
        .route("/health", get(health_checker_handler))
        .route("/register", post(register_user_handler))
        .route("/login", post(login_user_handler))
        .layer(Extension(app_state.di_container.auth_service.clone()));

    let private_routes = OpenApiRouter::new()
        .route("/me", get(get_me_handler))
        .route_layer(middleware::from_fn(jwt::auth))
        .layer(Extension(app_state.di_container.auth_service.clone()))
        .layer(Extension(app_state.jwt_config.clone()));

    public_routes.merge(private_routes)
}
