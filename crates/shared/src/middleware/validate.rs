use crate::errors::{AppErrorHttp, ServiceError, validation_messages};
use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// `Json<T>` that also runs `T::validate`, rejecting with the shared error envelope.
pub struct SimpleValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for SimpleValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppErrorHttp;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ServiceError::BadRequest(rejection.body_text()))?;

        value
            .validate()
            .map_err(|errors| ServiceError::Validation(validation_messages(&errors)))?;

        Ok(SimpleValidatedJson(value))
    }
}
