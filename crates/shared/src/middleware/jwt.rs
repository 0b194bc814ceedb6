use crate::{
    abstract_trait::jwt::DynJwtService,
    errors::{AppErrorHttp, ServiceError},
};
use axum::{
    Extension,
    extract::Request,
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use tracing::warn;

fn bearer_token(req: &Request) -> Result<&str, ServiceError> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| ServiceError::Unauthorized("Missing bearer token".to_string()))?;

    let value = header
        .to_str()
        .map_err(|_| ServiceError::Unauthorized("Invalid authorization header".to_string()))?;

    match value.split_once(' ') {
        Some((scheme, token))
            if scheme.eq_ignore_ascii_case("bearer") && !token.trim().is_empty() =>
        {
            Ok(token.trim())
        }
        _ => Err(ServiceError::Unauthorized("Missing bearer token".to_string())),
    }
}

/// Verifies the bearer token and stores the caller as a `CurrentUser` extension.
pub async fn auth(
    Extension(jwt): Extension<DynJwtService>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppErrorHttp> {
    let user = {
        let token = bearer_token(&req)?;
        jwt.verify_token(token).map_err(|e| {
            warn!("🔐 Rejected bearer token on {}: {e}", req.uri().path());
            e
        })?
    };

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}
