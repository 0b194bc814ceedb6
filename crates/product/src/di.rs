use anyhow::Result;
use shared::{
    abstract_trait::{
        product::{
            repository::{command::DynProductCommandRepository, query::DynProductQueryRepository},
            service::{command::DynProductCommandService, query::DynProductQueryService},
        },
        stock::{repository::DynStockRepository, service::DynStockService},
    },
    config::ConnectionPool,
    repository::{
        product::{command::ProductCommandRepository, query::ProductQueryRepository},
        stock::StockRepository,
    },
    service::{
        product::{ProductCommandService, ProductQueryService},
        stock::StockService,
    },
};
use std::sync::Arc;

#[derive(Clone)]
pub struct ProductDeps {
    pub query: DynProductQueryService,
    pub command: DynProductCommandService,
}

impl ProductDeps {
    pub fn new(
        query_repo: DynProductQueryRepository,
        command_repo: DynProductCommandRepository,
    ) -> Self {
        let query = Arc::new(ProductQueryService::new(query_repo)) as DynProductQueryService;
        let command =
            Arc::new(ProductCommandService::new(command_repo)) as DynProductCommandService;

        Self { query, command }
    }
}

#[derive(Clone)]
pub struct DependenciesInject {
    pub product: ProductDeps,
    pub stock: DynStockService,
}

impl std::fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("product_query", &"DynProductQueryService")
            .field("product_command", &"DynProductCommandService")
            .field("stock", &"DynStockService")
            .finish()
    }
}

impl DependenciesInject {
    pub fn new(pool: ConnectionPool) -> Result<Self> {
        let query_repo =
            Arc::new(ProductQueryRepository::new(pool.clone())) as DynProductQueryRepository;
        let command_repo =
            Arc::new(ProductCommandRepository::new(pool.clone())) as DynProductCommandRepository;
        let stock_repo = Arc::new(StockRepository::new(pool)) as DynStockRepository;

        let product = ProductDeps::new(query_repo.clone(), command_repo);
        let stock = Arc::new(StockService::new(stock_repo, query_repo)) as DynStockService;

        Ok(Self { product, stock })
    }
}
