use crate::di::DependenciesInject;
use anyhow::{Context, Result};
use shared::{
    abstract_trait::jwt::DynJwtService,
    config::{Config, ConnectionPool, JwtConfig},
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

        let di_container = DependenciesInject::new(pool)
            .context("Failed to initialize dependency injection container")?;

        Ok(Self {
            jwt_config,
            metrics: Metrics::new(),
            di_container,
        })
    }
}
