use crate::{
    errors::{AppErrorHttp, ServiceError},
    utils::Metrics,
};
use axum::{
    Extension,
    extract::{MatchedPath, Request},
    http::header::CONTENT_TYPE,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::time::Instant;

const UNMATCHED_ROUTE: &str = "unmatched";

pub async fn track_metrics(
    Extension(metrics): Extension<Metrics>,
    req: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = req.method().to_string();
    let path = route_label(req.extensions().get::<MatchedPath>());

    let response = next.run(req).await;

    metrics.record(&method, &path, response.status().as_u16(), start.elapsed());

    response
}

/// Unmatched requests share one label so arbitrary paths cannot grow the families.
fn route_label(matched: Option<&MatchedPath>) -> String {
    matched
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| UNMATCHED_ROUTE.to_string())
}

/// Serves the registry in the OpenMetrics text format.
pub async fn metrics_handler(
    Extension(metrics): Extension<Metrics>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let body = metrics
        .render()
        .map_err(|e| ServiceError::InternalServerError(format!("Failed to encode metrics: {e}")))?;

    Ok((
        [(
            CONTENT_TYPE,
            "application/openmetrics-text; version=1.0.0; charset=utf-8",
        )],
        body,
    ))
}
