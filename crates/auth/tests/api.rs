use auth::{handler::AppRouter, state::AppState};
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
};
use serde_json::{Value, json};
use shared::{
    config::{AUTH_MIGRATOR, Claims, Config, ConnectionManager, JwtConfig},
    model::role::Role,
};
use std::time::{SystemTime, UNIX_EPOCH};
use tower::ServiceExt;

fn test_config() -> Config {
    Config::from_lookup(|key| match key {
        "JWT_SECRET" => Some("auth-test-secret".to_string()),
        "BCRYPT_COST" => Some("4".to_string()),
        _ => None,
    })
    .unwrap()
}

async fn app() -> Router {
    let config = test_config();
    let pool = ConnectionManager::in_memory(&AUTH_MIGRATOR).await.unwrap();
    AppRouter::build(AppState::new(pool, &config).unwrap())
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let res: Response = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_with_token(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

async fn register(app: &Router, email: &str, role: &str) -> (StatusCode, Value) {
    send(
        app,
        post_json(
            "/register",
            json!({ "email": email, "password": "secret123", "role": role }),
        ),
    )
    .await
}

async fn login(app: &Router, email: &str, password: &str) -> (StatusCode, Value) {
    send(
        app,
        post_json("/login", json!({ "email": email, "password": password })),
    )
    .await
}

fn now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64
}

#[tokio::test]
async fn health_is_public() {
    let app = app().await;

    let (status, body) = send(
        &app,
        Request::builder().uri("/health").body(Body::empty()).unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
}

#[tokio::test]
async fn register_creates_user_once() {
    let app = app().await;

    let (status, body) = register(&app, "ana@example.com", "user").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "User created");
    assert!(body["data"]["user_id"].as_i64().unwrap() > 0);

    let (status, body) = register(&app, "ana@example.com", "user").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Email already registered");
}

#[tokio::test]
async fn register_rejects_bad_input() {
    let app = app().await;

    let (status, _) = send(
        &app,
        post_json("/register", json!({ "email": "nope", "password": "secret123" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        post_json("/register", json!({ "email": "a@b.com", "password": "123" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .contains("at least 6 characters")
    );

    let (status, _) = register(&app, "svc@example.com", "service").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_issues_bearer_token() {
    let app = app().await;
    register(&app, "bob@example.com", "admin").await;

    let (status, body) = login(&app, "bob@example.com", "secret123").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["token_type"], "bearer");

    let token = body["data"]["access_token"].as_str().unwrap();
    let (status, me) = send(&app, get_with_token("/me", token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["data"]["email"], "bob@example.com");
    assert_eq!(me["data"]["role"], "admin");
}

#[tokio::test]
async fn login_rejects_wrong_credentials() {
    let app = app().await;
    register(&app, "carl@example.com", "user").await;

    let (status, body) = login(&app, "carl@example.com", "wrong-password").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid credentials");

    let (status, body) = login(&app, "ghost@example.com", "secret123").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid credentials");
}

#[tokio::test]
async fn me_requires_a_valid_token() {
    let app = app().await;

    let (status, _) = send(
        &app,
        Request::builder().uri("/me").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(&app, get_with_token("/me", "not-a-jwt")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid token");

    let jwt = JwtConfig::new(&test_config().jwt);
    let expired = jwt
        .encode_claims(&Claims {
            sub: "1".to_string(),
            role: Role::User,
            iat: now() - 7200,
            exp: now() - 3600,
        })
        .unwrap();
    let (status, body) = send(&app, get_with_token("/me", &expired)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Token expired");
}

#[tokio::test]
async fn me_for_unknown_user_is_unauthorized() {
    let app = app().await;

    let jwt = JwtConfig::new(&test_config().jwt);
    let token = jwt
        .encode_claims(&Claims {
            sub: "999".to_string(),
            role: Role::User,
            iat: now(),
            exp: now() + 600,
        })
        .unwrap();

    let (status, body) = send(&app, get_with_token("/me", &token)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "User not found");
}

#[tokio::test]
async fn metrics_and_openapi_are_served() {
    let app = app().await;
    register(&app, "dora@example.com", "user").await;

    let res = app
        .clone()
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let text = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(text.to_vec()).unwrap();
    assert!(text.contains(r#"http_requests_total{method="POST",path="/register",status="201"} 1"#));

    let (status, doc) = send(
        &app,
        Request::builder()
            .uri("/api-docs/openapi.json")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/register"].is_object());
    assert!(doc["components"]["securitySchemes"]["bearer_auth"].is_object());
}

#[tokio::test]
async fn unknown_paths_share_one_metrics_label() {
    let app = app().await;

    for uri in ["/nope/1", "/nope/2"] {
        let (status, _) = send(&app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    let res = app
        .clone()
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let text = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(text.to_vec()).unwrap();

    assert!(text.contains(r#"http_requests_total{method="GET",path="unmatched",status="404"} 2"#));
    assert!(!text.contains("/nope/"));
}
