use super::{OrderCommandService, OrderQueryService};
use crate::{
    abstract_trait::{
        jwt::DynJwtService,
        order::{
            repository::command::{NewOrderItem, OrderCommandRepositoryTrait},
            service::{command::OrderCommandServiceTrait, query::OrderQueryServiceTrait},
        },
        product_client::ProductClientTrait,
    },
    config::{ConnectionManager, JwtConfig, JwtSettings, ORDER_MIGRATOR},
    domain::{
        requests::{CreateOrderItemRequest, CreateOrderRequest, CurrentUser, FindAllOrders},
        responses::{StockCheckResponse, StockLevelResponse},
    },
    errors::ServiceError,
    model::role::Role,
    repository::order::{command::OrderCommandRepository, query::OrderQueryRepository},
};
use async_trait::async_trait;
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};

#[derive(Default)]
struct FakeProducts {
    stock: Mutex<HashMap<i32, (i64, f64)>>,
    fail_decrease_for: Option<i32>,
    restock_delay: Option<Duration>,
    tokens: Mutex<Vec<String>>,
}

impl FakeProducts {
    fn with(products: &[(i32, i64, f64)]) -> Self {
        let stock = products
            .iter()
            .map(|&(id, units, price)| (id, (units, price)))
            .collect();

        Self {
            stock: Mutex::new(stock),
            ..Default::default()
        }
    }

    fn units(&self, product_id: i32) -> i64 {
        self.stock.lock().unwrap()[&product_id].0
    }
}

#[async_trait]
impl ProductClientTrait for FakeProducts {
    async fn check_stock(
        &self,
        token: &str,
        product_id: i32,
        qty: i32,
    ) -> Result<StockCheckResponse, ServiceError> {
        self.tokens.lock().unwrap().push(token.to_string());
        let stock = self.stock.lock().unwrap();
        let (units, price) = stock
            .get(&product_id)
            .copied()
            .ok_or_else(|| ServiceError::NotFound("Product not found".to_string()))?;

        Ok(StockCheckResponse {
            ok: units >= qty as i64,
            product_id,
            requested: qty as i64,
            available: Some(units),
            price: Some(price),
            message: String::new(),
        })
    }

    async fn decrease_stock(
        &self,
        _token: &str,
        product_id: i32,
        amount: i32,
    ) -> Result<StockLevelResponse, ServiceError> {
        if self.fail_decrease_for == Some(product_id) {
            return Err(ServiceError::Upstream(
                "Product service unavailable: boom".to_string(),
            ));
        }

        let mut stock = self.stock.lock().unwrap();
        let entry = stock
            .get_mut(&product_id)
            .ok_or_else(|| ServiceError::NotFound("Stock not found".to_string()))?;
        if entry.0 < amount as i64 {
            return Err(ServiceError::Conflict("Insufficient stock".to_string()));
        }
        entry.0 -= amount as i64;

        Ok(StockLevelResponse {
            product_id,
            units_available: entry.0,
        })
    }

    async fn increase_stock(
        &self,
        _token: &str,
        product_id: i32,
        amount: i32,
    ) -> Result<StockLevelResponse, ServiceError> {
        if let Some(delay) = self.restock_delay {
            tokio::time::sleep(delay).await;
        }

        let mut stock = self.stock.lock().unwrap();
        let entry = stock
            .get_mut(&product_id)
            .ok_or_else(|| ServiceError::NotFound("Stock not found".to_string()))?;
        entry.0 += amount as i64;

        Ok(StockLevelResponse {
            product_id,
            units_available: entry.0,
        })
    }
}

struct Harness {
    orders: Arc<OrderCommandRepository>,
    command: OrderCommandService,
    query: OrderQueryService,
    products: Arc<FakeProducts>,
    jwt: DynJwtService,
}

async fn harness(products: FakeProducts) -> Harness {
    let pool = ConnectionManager::in_memory(&ORDER_MIGRATOR).await.unwrap();
    let products = Arc::new(products);
    let jwt: DynJwtService = Arc::new(JwtConfig::new(&JwtSettings {
        secret: "order-tests".to_string(),
        algorithm: jsonwebtoken::Algorithm::HS256,
        access_token_expire_minutes: 5,
    }));

    let command_repo = Arc::new(OrderCommandRepository::new(pool.clone()));
    let query_repo = Arc::new(OrderQueryRepository::new(pool));

    Harness {
        orders: command_repo.clone(),
        command: OrderCommandService::new(
            command_repo,
            query_repo.clone(),
            products.clone(),
            jwt.clone(),
        ),
        query: OrderQueryService::new(query_repo),
        products,
        jwt,
    }
}

fn user(id: i32) -> CurrentUser {
    CurrentUser {
        id,
        role: Role::User,
    }
}

fn order_of(items: &[(i32, i32)]) -> CreateOrderRequest {
    CreateOrderRequest {
        items: items
            .iter()
            .map(|&(product_id, qty)| CreateOrderItemRequest { product_id, qty })
            .collect(),
    }
}

#[tokio::test]
async fn create_confirms_and_reserves_stock() {
    let h = harness(FakeProducts::with(&[(1, 100, 15000.0), (2, 50, 35000.0)])).await;

    let res = h
        .command
        .create(&user(7), &order_of(&[(1, 2), (2, 1)]))
        .await
        .unwrap();

    assert_eq!(res.data.status, "CONFIRMED");
    assert_eq!(res.data.user_id, 7);
    assert_eq!(res.data.total_amount, 65000.0);
    assert_eq!(res.data.items.len(), 2);
    assert_eq!(h.products.units(1), 98);
    assert_eq!(h.products.units(2), 49);
}

#[tokio::test]
async fn product_calls_use_a_service_token() {
    let h = harness(FakeProducts::with(&[(1, 10, 1.0)])).await;

    h.command
        .create(&user(3), &order_of(&[(1, 1)]))
        .await
        .unwrap();

    let token = h.products.tokens.lock().unwrap()[0].clone();
    let caller = h.jwt.verify_token(&token).unwrap();
    assert_eq!(caller.id, 3);
    assert_eq!(caller.role, Role::Service);
}

#[tokio::test]
async fn empty_order_is_rejected() {
    let h = harness(FakeProducts::default()).await;

    let err = h.command.create(&user(1), &order_of(&[])).await.unwrap_err();

    assert!(matches!(err, ServiceError::BadRequest(msg) if msg == "Order has no items"));
}

#[tokio::test]
async fn zero_quantity_fails_validation() {
    let h = harness(FakeProducts::with(&[(1, 10, 1.0)])).await;

    let err = h
        .command
        .create(&user(1), &order_of(&[(1, 0)]))
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Validation(_)));
}

#[tokio::test]
async fn insufficient_stock_creates_nothing() {
    let h = harness(FakeProducts::with(&[(1, 1, 15000.0)])).await;

    let err = h
        .command
        .create(&user(1), &order_of(&[(1, 5)]))
        .await
        .unwrap_err();

    match err {
        ServiceError::Conflict(msg) => assert_eq!(
            msg,
            "Insufficient stock for product_id=1: requested 5, available 1"
        ),
        other => panic!("unexpected error: {other:?}"),
    }

    let orders = h
        .query
        .find_all(&user(1), &FindAllOrders::default())
        .await
        .unwrap();
    assert!(orders.data.is_empty());
    assert_eq!(h.products.units(1), 1);
}

#[tokio::test]
async fn failed_reservation_releases_and_cancels() {
    let mut products = FakeProducts::with(&[(1, 10, 100.0), (2, 10, 200.0)]);
    products.fail_decrease_for = Some(2);
    let h = harness(products).await;

    let err = h
        .command
        .create(&user(4), &order_of(&[(1, 3), (2, 1)]))
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Upstream(_)));
    assert_eq!(h.products.units(1), 10);

    let orders = h
        .query
        .find_all(&user(4), &FindAllOrders::default())
        .await
        .unwrap();
    assert_eq!(orders.data.len(), 1);
    assert_eq!(orders.data[0].status, "CANCELLED");
}

#[tokio::test]
async fn cancel_restocks_once() {
    let h = harness(FakeProducts::with(&[(1, 10, 100.0)])).await;
    let order = h
        .command
        .create(&user(2), &order_of(&[(1, 4)]))
        .await
        .unwrap()
        .data;
    assert_eq!(h.products.units(1), 6);

    let cancelled = h.command.cancel(&user(2), order.id).await.unwrap();
    assert_eq!(cancelled.data.status, "CANCELLED");
    assert_eq!(h.products.units(1), 10);

    let err = h.command.cancel(&user(2), order.id).await.unwrap_err();
    assert!(
        matches!(err, ServiceError::Conflict(msg) if msg == "Order cannot be cancelled in status CANCELLED")
    );
    assert_eq!(h.products.units(1), 10);
}

#[tokio::test]
async fn strangers_are_forbidden_but_admins_are_not() {
    let h = harness(FakeProducts::with(&[(1, 10, 100.0)])).await;
    let order = h
        .command
        .create(&user(1), &order_of(&[(1, 1)]))
        .await
        .unwrap()
        .data;

    let err = h.query.find_by_id(&user(2), order.id).await.unwrap_err();
    assert!(matches!(err, ServiceError::Forbidden(_)));

    let err = h.command.cancel(&user(2), order.id).await.unwrap_err();
    assert!(matches!(err, ServiceError::Forbidden(_)));

    let admin = CurrentUser {
        id: 99,
        role: Role::Admin,
    };
    let found = h.query.find_by_id(&admin, order.id).await.unwrap();
    assert_eq!(found.data.id, order.id);
}

#[tokio::test]
async fn missing_order_is_not_found() {
    let h = harness(FakeProducts::default()).await;

    let err = h.query.find_by_id(&user(1), 42).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(msg) if msg == "Order not found"));

    let err = h.command.cancel(&user(1), 42).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn listing_all_orders_is_admin_only() {
    let h = harness(FakeProducts::with(&[(1, 10, 1.0)])).await;
    h.command.create(&user(1), &order_of(&[(1, 1)])).await.unwrap();
    h.command.create(&user(2), &order_of(&[(1, 1)])).await.unwrap();

    let all = FindAllOrders { all: true };

    let mine = h.query.find_all(&user(1), &all).await.unwrap();
    assert_eq!(mine.data.len(), 1);

    let admin = CurrentUser {
        id: 50,
        role: Role::Admin,
    };
    let everything = h.query.find_all(&admin, &all).await.unwrap();
    assert_eq!(everything.data.len(), 2);
    assert!(everything.data[0].id > everything.data[1].id);
}

#[tokio::test]
async fn concurrent_cancels_restock_once() {
    let mut products = FakeProducts::with(&[(1, 10, 100.0)]);
    products.restock_delay = Some(Duration::from_millis(50));
    let h = harness(products).await;
    let order = h
        .command
        .create(&user(2), &order_of(&[(1, 4)]))
        .await
        .unwrap()
        .data;
    assert_eq!(h.products.units(1), 6);

    let caller = user(2);
    let (first, second) = tokio::join!(
        h.command.cancel(&caller, order.id),
        h.command.cancel(&caller, order.id)
    );

    assert_eq!(first.is_ok() as u8 + second.is_ok() as u8, 1);
    let err = first.err().or(second.err()).unwrap();
    assert!(
        matches!(err, ServiceError::Conflict(msg) if msg == "Order cannot be cancelled in status CANCELLED")
    );
    assert_eq!(h.products.units(1), 10);
}

#[tokio::test]
async fn in_flight_order_cannot_be_cancelled() {
    let h = harness(FakeProducts::with(&[(1, 10, 100.0)])).await;
    let pending = h
        .orders
        .create(
            2,
            &[NewOrderItem {
                product_id: 1,
                qty: 3,
                unit_price: 100.0,
            }],
        )
        .await
        .unwrap();

    let err = h
        .command
        .cancel(&user(2), pending.order.id)
        .await
        .unwrap_err();

    assert!(
        matches!(err, ServiceError::Conflict(msg) if msg == "Order cannot be cancelled in status CREATED")
    );
    assert_eq!(h.products.units(1), 10);

    let found = h.query.find_by_id(&user(2), pending.order.id).await.unwrap();
    assert_eq!(found.data.status, "CREATED");
}
