use crate::{domain::requests::CurrentUser, errors::ServiceError, model::role::Role};
use std::sync::Arc;

pub type DynJwtService = Arc<dyn JwtServiceTrait + Send + Sync>;

pub trait JwtServiceTrait {
    fn generate_token(&self, user_id: i32, role: Role) -> Result<String, ServiceError>;
    fn verify_token(&self, token: &str) -> Result<CurrentUser, ServiceError>;
}
