use crate::{
    abstract_trait::user::repository::command::{NewUser, UserCommandRepositoryTrait},
    config::ConnectionPool,
    errors::RepositoryError,
    model::user::UserModel,
};
use anyhow::Result;
use async_trait::async_trait;
use tracing::error;

#[derive(Clone)]
pub struct UserCommandRepository {
    db_pool: ConnectionPool,
}

impl UserCommandRepository {
    pub fn new(db_pool: ConnectionPool) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl UserCommandRepositoryTrait for UserCommandRepository {
    async fn create(&self, user: &NewUser) -> Result<UserModel, RepositoryError> {
        sqlx::query_as::<_, UserModel>(
            r#"
            INSERT INTO users (email, password_hash, role, created_at, updated_at)
            VALUES (?1, ?2, ?3, CURRENT_TIMESTAMP, CURRENT_TIMESTAMP)
            RETURNING id, email, password_hash, role, created_at, updated_at
            "#,
        )
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.role)
        .fetch_one(&self.db_pool)
        .await
        .map_err(|e| {
            error!("❌ Database error in create user: {e:?}");
            RepositoryError::from(e)
        })
    }
}
