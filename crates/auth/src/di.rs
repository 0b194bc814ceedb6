use anyhow::Result;
use shared::{
    abstract_trait::{
        auth::DynAuthService,
        hashing::DynHashing,
        jwt::DynJwtService,
        user::repository::{command::DynUserCommandRepository, query::DynUserQueryRepository},
    },
    config::ConnectionPool,
    repository::user::{command::UserCommandRepository, query::UserQueryRepository},
    service::auth::AuthService,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct DependenciesInject {
    pub auth_service: DynAuthService,
}

impl std::fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("auth_service", &"DynAuthService")
            .finish()
    }
}

pub struct DependenciesInjectDeps {
    pub pool: ConnectionPool,
    pub hash: DynHashing,
    pub jwt_config: DynJwtService,
}

impl DependenciesInject {
    pub fn new(deps: DependenciesInjectDeps) -> Result<Self> {
        let DependenciesInjectDeps {
            pool,
            hash,
            jwt_config,
        } = deps;

        let user_query = Arc::new(UserQueryRepository::new(pool.clone())) as DynUserQueryRepository;
        let user_command =
            Arc::new(UserCommandRepository::new(pool.clone())) as DynUserCommandRepository;

        let auth_service =
            Arc::new(AuthService::new(user_query, user_command, hash, jwt_config))
                as DynAuthService;

        Ok(Self { auth_service })
    }
}
