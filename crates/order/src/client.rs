use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use shared::{
    abstract_trait::product_client::ProductClientTrait,
    config::ProductClientConfig,
    domain::responses::{ApiResponse, StockCheckResponse, StockLevelResponse},
    errors::{ErrorResponse, ServiceError},
};
use std::time::Duration;
use tracing::{debug, error, warn};

/// Outcome of a single call that did not produce data.
#[derive(Debug)]
enum CallError {
    /// The product service answered with a status we translate directly.
    Rejected(ServiceError),
    /// Transport failures and unexpected statuses; these may be retried.
    Unavailable(String),
}

impl CallError {
    fn into_service_error(self) -> ServiceError {
        match self {
            CallError::Rejected(err) => err,
            CallError::Unavailable(reason) => {
                ServiceError::Upstream(format!("Product service unavailable: {reason}"))
            }
        }
    }
}

/// HTTP client for the product service.
#[derive(Debug, Clone)]
pub struct ProductHttpClient {
    client: Client,
    base_url: String,
    retries: u32,
    backoff: Duration,
}

impl ProductHttpClient {
    pub fn new(config: &ProductClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .context("Failed to build product service HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            retries: config.retries,
            backoff: config.backoff,
        })
    }

    fn request(&self, method: Method, path: &str, token: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!("Sending {method} request to {url}");

        self.client.request(method, url).bearer_auth(token)
    }

    async fn call<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        product_id: i32,
    ) -> Result<T, CallError> {
        let response = request
            .send()
            .await
            .map_err(|e| CallError::Unavailable(e.to_string()))?;

        Self::handle_response(response, product_id).await
    }

    async fn handle_response<T: DeserializeOwned>(
        response: Response,
        product_id: i32,
    ) -> Result<T, CallError> {
        let status = response.status();

        if status.is_success() {
            return response
                .json::<ApiResponse<T>>()
                .await
                .map(|body| body.data)
                .map_err(|e| CallError::Unavailable(format!("invalid response body: {e}")));
        }

        let message = response
            .json::<ErrorResponse>()
            .await
            .map(|body| body.message)
            .unwrap_or_else(|_| status.to_string());

        let err = match status {
            StatusCode::NOT_FOUND => {
                ServiceError::NotFound(format!("Product {product_id} not found"))
            }
            StatusCode::UNAUTHORIZED => {
                ServiceError::Unauthorized("Product service rejected the token".to_string())
            }
            StatusCode::FORBIDDEN => ServiceError::Forbidden(message),
            StatusCode::CONFLICT => ServiceError::Conflict(message),
            _ => {
                error!("Product service returned {status}: {message}");
                return Err(CallError::Unavailable(format!("{status}: {message}")));
            }
        };

        Err(CallError::Rejected(err))
    }
}

#[async_trait]
impl ProductClientTrait for ProductHttpClient {
    async fn check_stock(
        &self,
        token: &str,
        product_id: i32,
        qty: i32,
    ) -> Result<StockCheckResponse, ServiceError> {
        let request = self
            .request(Method::GET, "/stock/check", token)
            .query(&[("product_id", product_id), ("qty", qty)]);

        self.call(request, product_id)
            .await
            .map_err(CallError::into_service_error)
    }

    async fn decrease_stock(
        &self,
        token: &str,
        product_id: i32,
        amount: i32,
    ) -> Result<StockLevelResponse, ServiceError> {
        let path = format!("/stock/{product_id}/decrease");
        let mut last_error = String::new();

        for attempt in 0..=self.retries {
            if attempt > 0 {
                tokio::time::sleep(self.backoff * attempt).await;
            }

            let request = self
                .request(Method::PATCH, &path, token)
                .query(&[("amount", amount)]);

            match self.call(request, product_id).await {
                Ok(level) => return Ok(level),
                Err(CallError::Rejected(err)) => return Err(err),
                Err(CallError::Unavailable(reason)) => {
                    warn!(
                        "⏳ Stock decrease for product {product_id} failed (attempt {}/{}): {reason}",
                        attempt + 1,
                        self.retries + 1
                    );
                    last_error = reason;
                }
            }
        }

        Err(CallError::Unavailable(last_error).into_service_error())
    }

    async fn increase_stock(
        &self,
        token: &str,
        product_id: i32,
        amount: i32,
    ) -> Result<StockLevelResponse, ServiceError> {
        let request = self
            .request(Method::PATCH, &format!("/stock/{product_id}/increase"), token)
            .query(&[("amount", amount)]);

        self.call(request, product_id)
            .await
            .map_err(CallError::into_service_error)
    }
}
