use crate::{
    domain::{
        requests::{AuthRequest, RegisterRequest},
        responses::{ApiResponse, RegisterResponse, TokenResponse, UserResponse},
    },
    errors::ServiceError,
};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

pub type DynAuthService = Arc<dyn AuthServiceTrait + Send + Sync>;

#[async_trait]
pub trait AuthServiceTrait {
    async fn register_user(
        &self,
        input: &RegisterRequest,
    ) -> Result<ApiResponse<RegisterResponse>, ServiceError>;
    async fn login_user(
        &self,
        input: &AuthRequest,
    ) -> Result<ApiResponse<TokenResponse>, ServiceError>;
    async fn get_me(&self, id: i32) -> Result<ApiResponse<UserResponse>, ServiceError>;
}
