use crate::di::{DependenciesInject, DependenciesInjectDeps};
use anyhow::{Context, Result};
use shared::{
    abstract_trait::{hashing::DynHashing, jwt::DynJwtService},
    config::{Config, ConnectionPool, Hashing, JwtConfig},
    utils::Metrics,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub jwt_config: DynJwtService,
    pub metrics: Metrics,
    pub di_container: DependenciesInject,
}

impl AppState {
    pub fn new(pool: ConnectionPool, config: &Config) -> Result<Self> {
        let jwt_config = Arc::new(JwtConfig::new(&config.jwt)) as DynJwtService;
        let hashing = Arc::new(Hashing::with_cost(config.bcrypt_cost)) as DynHashing;

        let deps = DependenciesInjectDeps {
            pool,
            hash: hashing,
            jwt_config: jwt_config.clone(),
        };

        let di_container = DependenciesInject::new(deps)
            .context("Failed to initialize dependency injection container")?;

        Ok(Self {
            jwt_config,
            metrics: Metrics::new(),
            di_container,
        })
    }
}
