//! HTTP-level tests for the session gate on the catalog routes.
//!
//! None of these touch the store: a request is expected to be rejected (or
//! accepted into parameter validation) strictly before the first database
//! round-trip.

mod common;

use axum::http::{header, StatusCode};
use common::{body_json, get, get_with_cookie, send_json, session_cookie};
use jsonwebtoken::{encode, EncodingKey, Header};

use cauldron_api::auth::jwt::Claims;

/// Every read route under /potions, for gate sweeps.
const PROTECTED_GET_ROUTES: &[&str] = &[
    "/potions/all",
    "/potions/names",
    "/potions/vendor/vendor-1",
    "/potions/price-range?min=1&max=2",
    "/potions/analytics/distinct-categories",
    "/potions/analytics/average-score-by-vendor",
    "/potions/analytics/average-score-by-category",
    "/potions/analytics/strength-flavor-ratio",
    "/potions/analytics/search?group=vendor_id&metric=count",
    "/potions/64f1c0a2b3d4e5f60718293a",
];

/// Requests without a session cookie are rejected on every catalog route.
#[tokio::test]
async fn test_missing_cookie_is_unauthorized() {
    for path in PROTECTED_GET_ROUTES {
        let app = common::build_test_app().await;
        let response = get(app, path).await;
        assert_eq!(
            response.status(),
            StatusCode::UNAUTHORIZED,
            "expected 401 for {path}"
        );
    }
}

/// Write routes are gated too, before the body is even parsed.
#[tokio::test]
async fn test_missing_cookie_is_unauthorized_on_writes() {
    let app = common::build_test_app().await;
    let response = send_json(app, "POST", "/potions", None, serde_json::json!({})).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let app = common::build_test_app().await;
    let response = send_json(
        app,
        "PUT",
        "/potions/64f1c0a2b3d4e5f60718293a",
        None,
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let app = common::build_test_app().await;
    let response = send_json(
        app,
        "DELETE",
        "/potions/64f1c0a2b3d4e5f60718293a",
        None,
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// A cookie that is not a signed token is rejected with the same outcome
/// as a missing one.
#[tokio::test]
async fn test_garbage_cookie_is_unauthorized() {
    let app = common::build_test_app().await;
    let response = get_with_cookie(
        app,
        "/potions/all",
        "cauldron_session=definitely.not.a-token",
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

/// An expired token is rejected even though its signature is valid.
#[tokio::test]
async fn test_expired_token_is_unauthorized() {
    let config = common::test_config();

    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: "64f1c0a2b3d4e5f60718293a".to_string(),
        username: "morgana".to_string(),
        iat: now - 7200,
        exp: now - 3600,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.auth.jwt_secret.as_bytes()),
    )
    .expect("encoding should succeed");

    let app = common::build_test_app().await;
    let cookie = format!("{}={}", config.auth.cookie_name, token);
    let response = get_with_cookie(app, "/potions/all", &cookie).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// A token signed with a different secret is rejected.
#[tokio::test]
async fn test_foreign_signature_is_unauthorized() {
    let config = common::test_config();

    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: "64f1c0a2b3d4e5f60718293a".to_string(),
        username: "morgana".to_string(),
        iat: now,
        exp: now + 3600,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"some-other-service-secret"),
    )
    .expect("encoding should succeed");

    let app = common::build_test_app().await;
    let cookie = format!("{}={}", config.auth.cookie_name, token);
    let response = get_with_cookie(app, "/potions/all", &cookie).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// A valid session passes the gate: the same request that 401s bare now
/// reaches parameter validation and fails there instead.
#[tokio::test]
async fn test_valid_session_reaches_the_handler() {
    let app = common::build_test_app().await;
    let path = "/potions/analytics/search?group=bogus&metric=count";

    let response = get(app, path).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let app = common::build_test_app().await;
    let response = get_with_cookie(app, path, &session_cookie("morgana")).await;
    assert_eq!(
        response.status(),
        StatusCode::BAD_REQUEST,
        "a valid session must get past the gate to validation"
    );
}

/// The health probe stays public.
#[tokio::test]
async fn test_health_is_public() {
    let app = common::build_test_app().await;
    let response = get(app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
}

/// Logout always succeeds and clears the cookie. (The token itself is not
/// revoked; only the client-side cookie goes away.)
#[tokio::test]
async fn test_logout_clears_the_session_cookie() {
    let app = common::build_test_app().await;
    let response = get_with_cookie(app, "/auth/logout", &session_cookie("morgana")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("logout must set a removal cookie")
        .to_str()
        .expect("header should be ASCII")
        .to_string();
    assert!(set_cookie.starts_with("cauldron_session="));
    assert!(
        set_cookie.contains("Max-Age=0"),
        "removal cookie must expire immediately: {set_cookie}"
    );

    let json = body_json(response).await;
    assert_eq!(json["message"], "Logged out");
}

/// Logout has no precondition; it succeeds without any session at all.
#[tokio::test]
async fn test_logout_without_a_session_still_succeeds() {
    let app = common::build_test_app().await;
    let response = get(app, "/auth/logout").await;
    assert_eq!(response.status(), StatusCode::OK);
}
