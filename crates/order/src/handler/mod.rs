mod order;

use crate::state::AppState;
use anyhow::{Context, Result};
use axum::{Extension, Json, Router, middleware, routing::get};
use shared::{
    middleware::metrics::{metrics_handler, track_metrics},
    utils::shutdown_signal,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::info;
use utoipa::{Modify, OpenApi, openapi::security::SecurityScheme};
use utoipa_axum::router::OpenApiRouter;

pub use self::order::order_routes;

#[derive(OpenApi)]
#[openapi(
    paths(
        order::health_checker_handler,
        order::create_order,
        order::get_orders,
        order::get_order,
        order::cancel_order,
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Order", description = "Order placement, lookup and cancellation"),
        (name = "Health", description = "Liveness probe")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);

        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(utoipa::openapi::security::Http::new(
                utoipa::openapi::security::HttpAuthScheme::Bearer,
            )),
        );
    }
}

pub struct AppRouter;

impl AppRouter {
    pub fn build(app_state: AppState) -> Router {
        let shared_state = Arc::new(app_state);

        let api_router =
            OpenApiRouter::with_openapi(ApiDoc::openapi()).merge(order_routes(shared_state.clone()));

        let (app_router, api) = api_router.split_for_parts();

        app_router
            .route("/api-docs/openapi.json", get(move || async move { Json(api) }))
            .route("/metrics", get(metrics_handler))
            .layer(middleware::from_fn(track_metrics))
            .layer(Extension(shared_state.metrics.clone()))
            .layer(TraceLayer::new_for_http())
            .layer(RequestBodyLimitLayer::new(1024 * 1024))
    }

    pub async fn serve(port: u16, app_state: AppState) -> Result<()> {
        let app = Self::build(app_state);

        let addr = format!("0.0.0.0:{port}");
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;

        info!("🚀 Order service running on http://{}", listener.local_addr()?);
        info!("📚 OpenAPI document at http://localhost:{port}/api-docs/openapi.json");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("Order server failed")?;

        Ok(())
    }
}
