use crate::di::{DependenciesInject, DependenciesInjectDeps};
use anyhow::{Context, Result};
use shared::{
    abstract_trait::{jwt::DynJwtService, product_client::DynProductClient},
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
        let deps = DependenciesInjectDeps::with_http_client(
            pool,
            jwt_config.clone(),
            &config.product_client,
        )?;

        Self::from_deps(deps)
    }

    /// Builds the state around an already chosen product client.
    pub fn with_product_client(
        pool: ConnectionPool,
        config: &Config,
        product_client: DynProductClient,
    ) -> Result<Self> {
        let jwt_config = Arc::new(JwtConfig::new(&config.jwt)) as DynJwtService;

        Self::from_deps(DependenciesInjectDeps {
            pool,
            jwt_config,
            product_client,
        })
    }

    fn from_deps(deps: DependenciesInjectDeps) -> Result<Self> {
        let jwt_config = deps.jwt_config.clone();

        let di_container = DependenciesInject::new(deps)
            .context("Failed to initialize dependency injection container")?;

        Ok(Self {
            jwt_config,
            metrics: Metrics::new(),
            di_container,
        })
    }
}
