#![allow(dead_code)]

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::patch,
};
use serde_json::json;
use shared::config::{Config, ConnectionManager, PRODUCT_MIGRATOR};
use std::sync::{
    Arc,
    atomic::{AtomicU32, Ordering},
};
use tokio::net::TcpListener;

pub const SECRET: &str = "order-test-secret";

pub fn config(product_url: &str) -> Config {
    let product_url = product_url.to_string();
    Config::from_lookup(move |key| match key {
        "JWT_SECRET" => Some(SECRET.to_string()),
        "PRODUCT_SERVICE_URL" => Some(product_url.clone()),
        "PRODUCT_SERVICE_BACKOFF_MS" => Some("0".to_string()),
        _ => None,
    })
    .unwrap()
}

/// Runs a seeded product service on an ephemeral port.
pub async fn spawn_product_service() -> (String, product::state::AppState) {
    let pool = ConnectionManager::in_memory(&PRODUCT_MIGRATOR)
        .await
        .unwrap();
    let state = product::state::AppState::new(pool, &config("http://unused")).unwrap();
    state
        .di_container
        .product
        .command
        .seed_defaults()
        .await
        .unwrap();

    let app = product::handler::AppRouter::build(state.clone());
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), state)
}

pub async fn units_available(state: &product::state::AppState, product_id: i32) -> i64 {
    state
        .di_container
        .stock
        .check(product_id, 1)
        .await
        .unwrap()
        .data
        .available
        .unwrap()
}

#[derive(Clone)]
struct FlakyStock {
    failures: u32,
    attempts: Arc<AtomicU32>,
}

async fn flaky_decrease(State(stock): State<FlakyStock>, Path(id): Path<i32>) -> Response {
    let attempt = stock.attempts.fetch_add(1, Ordering::SeqCst);

    if attempt < stock.failures {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "status": "error", "message": "database is locked" })),
        )
            .into_response();
    }

    Json(json!({
        "status": "success",
        "message": "Stock decreased",
        "data": { "product_id": id, "units_available": 7 }
    }))
    .into_response()
}

/// Stock endpoint that answers 500 for the first `failures` decreases.
/// Returns its URL and the number of decrease requests it has seen.
pub async fn spawn_flaky_stock(failures: u32) -> (String, Arc<AtomicU32>) {
    let attempts = Arc::new(AtomicU32::new(0));
    let app = Router::new()
        .route("/stock/{id}/decrease", patch(flaky_decrease))
        .with_state(FlakyStock {
            failures,
            attempts: attempts.clone(),
        });

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), attempts)
}
