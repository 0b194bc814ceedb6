use crate::client::ProductHttpClient;
use anyhow::{Context, Result};
use shared::{
    abstract_trait::{
        jwt::DynJwtService,
        order::{
            repository::{command::DynOrderCommandRepository, query::DynOrderQueryRepository},
            service::{command::DynOrderCommandService, query::DynOrderQueryService},
        },
        product_client::DynProductClient,
    },
    config::{ConnectionPool, ProductClientConfig},
    repository::order::{command::OrderCommandRepository, query::OrderQueryRepository},
    service::order::{OrderCommandService, OrderQueryService},
};
use std::sync::Arc;

#[derive(Clone)]
pub struct DependenciesInject {
    pub order_command: DynOrderCommandService,
    pub order_query: DynOrderQueryService,
}

impl std::fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("order_command", &"DynOrderCommandService")
            .field("order_query", &"DynOrderQueryService")
            .finish()
    }
}

pub struct DependenciesInjectDeps {
    pub pool: ConnectionPool,
    pub jwt_config: DynJwtService,
    pub product_client: DynProductClient,
}

impl DependenciesInjectDeps {
    /// Wires the real HTTP client from configuration.
    pub fn with_http_client(
        pool: ConnectionPool,
        jwt_config: DynJwtService,
        config: &ProductClientConfig,
    ) -> Result<Self> {
        let product_client = Arc::new(
            ProductHttpClient::new(config).context("Failed to create product client")?,
        ) as DynProductClient;

        Ok(Self {
            pool,
            jwt_config,
            product_client,
        })
    }
}

impl DependenciesInject {
    pub fn new(deps: DependenciesInjectDeps) -> Result<Self> {
        let DependenciesInjectDeps {
            pool,
            jwt_config,
            product_client,
        } = deps;

        let command_repo =
            Arc::new(OrderCommandRepository::new(pool.clone())) as DynOrderCommandRepository;
        let query_repo = Arc::new(OrderQueryRepository::new(pool)) as DynOrderQueryRepository;

        let order_command = Arc::new(OrderCommandService::new(
            command_repo,
            query_repo.clone(),
            product_client,
            jwt_config,
        )) as DynOrderCommandService;
        let order_query = Arc::new(OrderQueryService::new(query_repo)) as DynOrderQueryService;

        Ok(Self {
            order_command,
            order_query,
        })
    }
}
