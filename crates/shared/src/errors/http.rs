use crate::errors::{
    error::ErrorResponse, repository::RepositoryError, service::ServiceError,
};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, info, warn};

#[derive(Debug)]
pub struct AppErrorHttp(pub ServiceError);

impl From<ServiceError> for AppErrorHttp {
    fn from(err: ServiceError) -> Self {
        AppErrorHttp(err)
    }
}

impl From<RepositoryError> for AppErrorHttp {
    fn from(err: RepositoryError) -> Self {
        AppErrorHttp(ServiceError::Repo(err))
    }
}

impl AppErrorHttp {
    pub fn status_and_message(&self) -> (StatusCode, String) {
        match &self.0 {
            ServiceError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Invalid credentials".to_string())
            }
            ServiceError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            ServiceError::TokenExpired => (StatusCode::UNAUTHORIZED, "Token expired".to_string()),
            ServiceError::InvalidToken | ServiceError::Jwt(_) => {
                (StatusCode::UNAUTHORIZED, "Invalid token".to_string())
            }
            ServiceError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),
            ServiceError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                format!("Validation failed: {}", errors.join("; ")),
            ),
            ServiceError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ServiceError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ServiceError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            ServiceError::Upstream(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg.clone()),
            ServiceError::Repo(repo_err) => match repo_err {
                RepositoryError::NotFound => (StatusCode::NOT_FOUND, "Not found".to_string()),
                RepositoryError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
                RepositoryError::AlreadyExists(msg) => (StatusCode::CONFLICT, msg.clone()),
                RepositoryError::ForeignKey(msg) => (
                    StatusCode::BAD_REQUEST,
                    format!("Foreign key violation: {msg}"),
                ),
                RepositoryError::Sqlx(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                ),
            },
            ServiceError::Bcrypt(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal authentication error".to_string(),
            ),
            ServiceError::InternalServerError(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
            }
        }
    }
}

impl IntoResponse for AppErrorHttp {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        if status.is_server_error() {
            error!("🚨 {} -> {}", self.0, status);
        } else if status == StatusCode::NOT_FOUND {
            info!("🔍 {} -> {}", self.0, status);
        } else {
            warn!("⚠️ {} -> {}", self.0, status);
        }

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: ServiceError) -> StatusCode {
        AppErrorHttp(err).status_and_message().0
    }

    #[test]
    fn credential_and_token_errors_are_unauthorized() {
        assert_eq!(status_of(ServiceError::InvalidCredentials), StatusCode::UNAUTHORIZED);
        assert_eq!(status_of(ServiceError::TokenExpired), StatusCode::UNAUTHORIZED);
        assert_eq!(status_of(ServiceError::InvalidToken), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn repository_errors_map_to_client_statuses() {
        assert_eq!(
            status_of(ServiceError::Repo(RepositoryError::NotFound)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(ServiceError::Repo(RepositoryError::AlreadyExists("dup".into()))),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn upstream_failure_is_service_unavailable() {
        let (status, message) =
            AppErrorHttp(ServiceError::Upstream("Product service unavailable".into()))
                .status_and_message();

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(message, "Product service unavailable");
    }

    #[test]
    fn token_expired_keeps_its_own_message() {
        let (_, message) = AppErrorHttp(ServiceError::TokenExpired).status_and_message();
        assert_eq!(message, "Token expired");
    }
}
