mod common;

use common::{SECRET, config, spawn_flaky_stock, spawn_product_service, units_available};
use order::client::ProductHttpClient;
use shared::{
    abstract_trait::{jwt::JwtServiceTrait, product_client::ProductClientTrait},
    config::{JwtConfig, ProductClientConfig},
    errors::ServiceError,
    model::role::Role,
};
use std::{sync::atomic::Ordering, time::Duration};

fn client(base_url: &str) -> ProductHttpClient {
    ProductHttpClient::new(&ProductClientConfig {
        base_url: base_url.to_string(),
        timeout: Duration::from_secs(2),
        retries: 2,
        backoff: Duration::ZERO,
    })
    .unwrap()
}

fn token(secret: &str, role: Role) -> String {
    let mut settings = config("http://unused").jwt;
    settings.secret = secret.to_string();

    JwtConfig::new(&settings).generate_token(1, role).unwrap()
}

#[tokio::test]
async fn stock_round_trip_against_the_product_service() {
    let (url, products) = spawn_product_service().await;
    let client = client(&url);
    let service = token(SECRET, Role::Service);

    let check = client.check_stock(&service, 1, 10).await.unwrap();
    assert!(check.ok);
    assert_eq!(check.price, Some(15000.0));

    let level = client.decrease_stock(&service, 1, 10).await.unwrap();
    assert_eq!(level.units_available, 90);

    let level = client.increase_stock(&service, 1, 4).await.unwrap();
    assert_eq!(level.units_available, 94);
    assert_eq!(units_available(&products, 1).await, 94);
}

#[tokio::test]
async fn product_service_statuses_are_translated() {
    let (url, _products) = spawn_product_service().await;
    let client = client(&url);
    let service = token(SECRET, Role::Service);

    let err = client.decrease_stock(&service, 3, 500).await.unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(msg) if msg == "Insufficient stock"));

    let err = client.decrease_stock(&service, 99, 1).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(msg) if msg == "Product 99 not found"));

    let err = client
        .decrease_stock(&token(SECRET, Role::User), 1, 1)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Forbidden(msg) if msg == "Admin only"));

    let err = client
        .check_stock(&token("some-other-secret", Role::Service), 1, 1)
        .await
        .unwrap_err();
    assert!(
        matches!(err, ServiceError::Unauthorized(msg) if msg == "Product service rejected the token")
    );
}

#[tokio::test]
async fn unreachable_product_service_is_unavailable() {
    let client = client("http://127.0.0.1:9");
    let service = token(SECRET, Role::Service);

    let err = client.decrease_stock(&service, 1, 1).await.unwrap_err();
    assert!(
        matches!(&err, ServiceError::Upstream(msg) if msg.starts_with("Product service unavailable:")),
        "unexpected error: {err:?}"
    );

    let err = client.check_stock(&service, 1, 1).await.unwrap_err();
    assert!(matches!(err, ServiceError::Upstream(_)));
}

#[tokio::test]
async fn decrease_recovers_after_a_transient_failure() {
    let (url, attempts) = spawn_flaky_stock(1).await;
    let client = client(&url);

    let level = client
        .decrease_stock(&token(SECRET, Role::Service), 5, 3)
        .await
        .unwrap();

    assert_eq!(level.product_id, 5);
    assert_eq!(level.units_available, 7);
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn decrease_gives_up_after_the_configured_retries() {
    let (url, attempts) = spawn_flaky_stock(u32::MAX).await;
    let client = client(&url);

    let err = client
        .decrease_stock(&token(SECRET, Role::Service), 5, 3)
        .await
        .unwrap_err();

    assert_eq!(attempts.load(Ordering::SeqCst), 3);
    assert!(
        matches!(&err, ServiceError::Upstream(msg)
            if msg.starts_with("Product service unavailable: 500") && msg.ends_with("database is locked")),
        "unexpected error: {err:?}"
    );
}
