use crate::{
    abstract_trait::{
        auth::AuthServiceTrait,
        hashing::DynHashing,
        jwt::DynJwtService,
        user::repository::{
            command::{DynUserCommandRepository, NewUser},
            query::DynUserQueryRepository,
        },
    },
    domain::{
        requests::{AuthRequest, RegisterRequest},
        responses::{ApiResponse, RegisterResponse, TokenResponse, UserResponse},
    },
    errors::{RepositoryError, ServiceError, validation_messages},
    model::role::Role,
};
use anyhow::Result;
use async_trait::async_trait;
use tracing::{error, info, warn};
use validator::Validate;

const EMAIL_TAKEN: &str = "Email already registered";

pub struct AuthService {
    query: DynUserQueryRepository,
    command: DynUserCommandRepository,
    hashing: DynHashing,
    jwt_config: DynJwtService,
}

impl AuthService {
    pub fn new(
        query: DynUserQueryRepository,
        command: DynUserCommandRepository,
        hashing: DynHashing,
        jwt_config: DynJwtService,
    ) -> Self {
        Self {
            query,
            command,
            hashing,
            jwt_config,
        }
    }
}

#[async_trait]
impl AuthServiceTrait for AuthService {
    async fn register_user(
        &self,
        input: &RegisterRequest,
    ) -> Result<ApiResponse<RegisterResponse>, ServiceError> {
        if let Err(errors) = input.validate() {
            return Err(ServiceError::Validation(validation_messages(&errors)));
        }

        info!("🆕 Registering user {}", input.email);

        if self.query.find_by_email(&input.email).await?.is_some() {
            warn!("📧 Email {} already registered", input.email);
            return Err(ServiceError::BadRequest(EMAIL_TAKEN.to_string()));
        }

        let password_hash = self.hashing.hash_password(&input.password).await.map_err(|e| {
            error!("❌ Failed to hash password: {e:?}");
            e
        })?;

        let new_user = NewUser {
            email: input.email.clone(),
            password_hash,
            role: input.role.to_string(),
        };

        let user = match self.command.create(&new_user).await {
            Ok(user) => user,
            Err(RepositoryError::AlreadyExists(_)) => {
                return Err(ServiceError::BadRequest(EMAIL_TAKEN.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        info!("✅ User created with id={}", user.id);

        Ok(ApiResponse::success(
            "User created",
            RegisterResponse { user_id: user.id },
        ))
    }

    async fn login_user(
        &self,
        input: &AuthRequest,
    ) -> Result<ApiResponse<TokenResponse>, ServiceError> {
        let Some(user) = self.query.find_by_email(&input.email).await? else {
            warn!("🔐 Login attempt for unknown email {}", input.email);
            return Err(ServiceError::InvalidCredentials);
        };

        if !self
            .hashing
            .compare_password(&user.password_hash, &input.password)
            .await?
        {
            warn!("🔐 Wrong password for user_id={}", user.id);
            return Err(ServiceError::InvalidCredentials);
        }

        let role = user.role.parse::<Role>().unwrap_or_default();
        let token = self.jwt_config.generate_token(user.id, role)?;

        info!("✅ Issued access token for user_id={}", user.id);

        Ok(ApiResponse::success(
            "Login successful",
            TokenResponse::bearer(token),
        ))
    }

    async fn get_me(&self, id: i32) -> Result<ApiResponse<UserResponse>, ServiceError> {
        let user = self
            .query
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::Unauthorized("User not found".to_string()))?;

        Ok(ApiResponse::success(
            "User fetched successfully",
            UserResponse::from(user),
        ))
    }
}
