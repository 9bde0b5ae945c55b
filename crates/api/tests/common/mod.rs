//! Shared harness for HTTP-level integration tests.
//!
//! Builds the real application router with the production middleware stack.
//! The MongoDB driver connects lazily, so no live deployment is needed as
//! long as a test only exercises paths that resolve before the first store
//! round-trip (the auth gate, parameter validation, cookie handling).

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use cauldron_api::auth::jwt::generate_session_token;
use cauldron_api::config::{AuthConfig, ServerConfig};
use cauldron_api::router::build_app_router;
use cauldron_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults and a known JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        mongo_uri: "mongodb://127.0.0.1:27017".to_string(),
        mongo_db: "cauldron_test".to_string(),
        auth: AuthConfig {
            jwt_secret: "integration-test-secret".to_string(),
            cookie_name: "cauldron_session".to_string(),
            cookie_secure: false,
            session_expiry_hours: 24,
        },
    }
}

/// Build the full application router, mirroring `main.rs`.
pub async fn build_test_app() -> Router {
    let config = test_config();
    let db = cauldron_db::connect(&config.mongo_uri, &config.mongo_db)
        .await
        .expect("client construction should not require a live server");

    let state = AppState {
        db,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Cookie header value carrying a validly signed session for `username`.
pub fn session_cookie(username: &str) -> String {
    let config = test_config();
    let token = generate_session_token("64f1c0a2b3d4e5f60718293a", username, &config.auth)
        .expect("token generation should succeed");
    format!("{}={}", config.auth.cookie_name, token)
}

/// Issue a GET request.
pub async fn get(app: Router, path: &str) -> Response {
    app.oneshot(
        Request::builder()
            .uri(path)
            .body(Body::empty())
            .expect("request should build"),
    )
    .await
    .expect("request should complete")
}

/// Issue a GET request with a `Cookie` header.
pub async fn get_with_cookie(app: Router, path: &str, cookie: &str) -> Response {
    app.oneshot(
        Request::builder()
            .uri(path)
            .header(header::COOKIE, cookie)
            .body(Body::empty())
            .expect("request should build"),
    )
    .await
    .expect("request should complete")
}

/// Issue a request with a JSON body and optional `Cookie` header.
pub async fn send_json(
    app: Router,
    method: &str,
    path: &str,
    cookie: Option<&str>,
    body: serde_json::Value,
) -> Response {
    let mut builder = Request::builder()
        .method(method)
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    app.oneshot(
        builder
            .body(Body::from(body.to_string()))
            .expect("request should build"),
    )
    .await
    .expect("request should complete")
}

/// Read a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}
