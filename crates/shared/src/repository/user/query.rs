use crate::{
    abstract_trait::user::repository::query::UserQueryRepositoryTrait, config::ConnectionPool,
    errors::RepositoryError, model::user::UserModel,
};
use anyhow::Result;
use async_trait::async_trait;
use tracing::error;

#[derive(Clone)]
pub struct UserQueryRepository {
    db_pool: ConnectionPool,
}

impl UserQueryRepository {
    pub fn new(db_pool: ConnectionPool) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl UserQueryRepositoryTrait for UserQueryRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<UserModel>, RepositoryError> {
        sqlx::query_as::<_, UserModel>(
            r#"
            SELECT id, email, password_hash, role, created_at, updated_at
            FROM users
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db_pool)
        .await
        .map_err(|e| {
            error!("❌ Database error in find_by_id user: {e:?}");
            RepositoryError::from(e)
        })
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserModel>, RepositoryError> {
        sqlx::query_as::<_, UserModel>(
            r#"
            SELECT id, email, password_hash, role, created_at, updated_at
            FROM users
            WHERE email = ?1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db_pool)
        .await
        .map_err(|e| {
            error!("❌ Database error in find_by_email user: {e:?}");
            RepositoryError::from(e)
        })
    }
}
