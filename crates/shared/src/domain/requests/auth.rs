use crate::{errors::ServiceError, model::role::Role};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AuthRequest {
    #[validate(email(message = "Invalid email"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email"))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    #[serde(default)]
    #[validate(custom(function = "registrable_role"))]
    pub role: Role,
}

fn registrable_role(role: &Role) -> Result<(), ValidationError> {
    match role {
        Role::User | Role::Admin => Ok(()),
        Role::Service => {
            Err(ValidationError::new("role").with_message("Role must be user or admin".into()))
        }
    }
}

/// The caller behind a verified bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: i32,
    pub role: Role,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn ensure_admin(&self) -> Result<(), ServiceError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(ServiceError::Forbidden("Admin only".to_string()))
        }
    }

    /// Stock mutations are open to admins and to other services.
    pub fn ensure_stock_operator(&self) -> Result<(), ServiceError> {
        match self.role {
            Role::Admin | Role::Service => Ok(()),
            Role::User => Err(ServiceError::Forbidden("Admin only".to_string())),
        }
    }

    pub fn can_access(&self, owner_id: i32) -> bool {
        self.is_admin() || self.id == owner_id
    }
}
