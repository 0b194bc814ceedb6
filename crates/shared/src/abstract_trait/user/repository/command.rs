use crate::{errors::RepositoryError, model::user::UserModel};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

pub type DynUserCommandRepository = Arc<dyn UserCommandRepositoryTrait + Send + Sync>;

#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub role: String,
}

#[async_trait]
pub trait UserCommandRepositoryTrait {
    async fn create(&self, user: &NewUser) -> Result<UserModel, RepositoryError>;
}
