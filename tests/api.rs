//! End-to-end tests against the real router.
//!
//! Tokens are signed in-test with the fixture keypair; the router is driven
//! with `tower::ServiceExt::oneshot`, no listener involved.

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use http_body_util::BodyExt;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde_json::{Value, json};
use std::time::{SystemTime, UNIX_EPOCH};
use tower::ServiceExt;

use secured_greeting::app;
use secured_greeting::config::SsoClientConfig;
use secured_greeting::services::auth::verifier::AuthService;
use secured_greeting::state::AppState;

const PUBLIC_PEM: &str = include_str!("fixtures/jwt_rsa_pub.pem");
const PRIVATE_PEM: &str = include_str!("fixtures/jwt_rsa.pem");
const OTHER_PRIVATE_PEM: &str = include_str!("fixtures/other_rsa.pem");

fn now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs()
}

fn sign(private_pem: &str, claims: &Value) -> String {
    let key = EncodingKey::from_rsa_pem(private_pem.as_bytes()).unwrap();
    jsonwebtoken::encode(&Header::new(Algorithm::RS256), claims, &key).unwrap()
}

fn user_claims(sub: &str, roles: &[&str], exp: u64) -> Value {
    json!({
        "sub": sub,
        "exp": exp,
        "realm_access": { "roles": roles },
    })
}

fn test_router() -> Router {
    // Leeway 0 mirrors the production default (TOKEN_LEEWAY_SECONDS unset).
    let auth = AuthService::new(PUBLIC_PEM, 0).unwrap();
    let sso = SsoClientConfig {
        realm: Some("master".into()),
        auth_server_url: Some("https://sso.example.test/auth".into()),
        resource: Some("demo".into()),
        secret: Some("demo-secret".into()),
    };
    let state = AppState::new(auth, "realm_access/roles", sso);
    app::build_router(state, "webroot")
}

async fn send(router: Router, method: Method, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let response = router
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::String(
        String::from_utf8_lossy(&bytes).into_owned(),
    ));
    (status, body)
}

#[tokio::test]
async fn missing_authorization_header_is_401() {
    let (status, _) = send(test_router(), Method::GET, "/api/greeting", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn missing_header_with_name_param_is_still_401() {
    let (status, _) = send(test_router(), Method::GET, "/api/greeting?name=Charles", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn token_signed_with_foreign_key_is_401() {
    // Claims carry the required role; the signature still decides.
    let token = sign(
        OTHER_PRIVATE_PEM,
        &user_claims("admin", &["user", "booster-admin"], now() + 300),
    );
    let (status, _) = send(test_router(), Method::GET, "/api/greeting", Some(&token)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn expired_token_is_401() {
    let token = sign(
        PRIVATE_PEM,
        &user_claims("admin", &["user", "booster-admin"], now() - 300),
    );
    let (status, _) = send(test_router(), Method::GET, "/api/greeting", Some(&token)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn just_expired_token_is_401_under_default_leeway() {
    // Expired only seconds ago; with no skew tolerance that is already too late.
    let token = sign(
        PRIVATE_PEM,
        &user_claims("admin", &["user", "booster-admin"], now() - 5),
    );
    let (status, _) = send(test_router(), Method::GET, "/api/greeting", Some(&token)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn tampered_payload_is_401() {
    let token = sign(PRIVATE_PEM, &user_claims("alice", &["user"], now() + 300));
    let [head, payload, sig]: [&str; 3] =
        token.split('.').collect::<Vec<_>>().try_into().unwrap();

    // Grant ourselves the role without re-signing.
    let mut claims: Value =
        serde_json::from_slice(&URL_SAFE_NO_PAD.decode(payload).unwrap()).unwrap();
    claims["realm_access"]["roles"] = json!(["user", "booster-admin"]);
    let forged = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims).unwrap());

    let tampered = format!("{}.{}.{}", head, forged, sig);
    let (status, _) = send(test_router(), Method::GET, "/api/greeting", Some(&tampered)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn valid_token_without_required_role_is_403() {
    let token = sign(PRIVATE_PEM, &user_claims("alice", &["user"], now() + 300));
    let (status, body) = send(test_router(), Method::GET, "/api/greeting", Some(&token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], "FORBIDDEN");
}

#[tokio::test]
async fn unauthenticated_body_does_not_leak_the_reason() {
    // Same opaque body for a missing header and for an expired token.
    let (_, body_missing) = send(test_router(), Method::GET, "/api/greeting", None).await;

    let expired = sign(PRIVATE_PEM, &user_claims("alice", &["user"], now() - 300));
    let (_, body_expired) =
        send(test_router(), Method::GET, "/api/greeting", Some(&expired)).await;

    assert_eq!(body_missing, body_expired);
    assert_eq!(body_missing["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn admin_gets_greeting_with_default_name() {
    let token = sign(
        PRIVATE_PEM,
        &user_claims("admin", &["user", "booster-admin"], now() + 300),
    );
    let (status, body) = send(test_router(), Method::GET, "/api/greeting", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["content"], "Hello, World!");
    assert_eq!(body["id"], 1);
}

#[tokio::test]
async fn name_param_changes_the_greeting() {
    let token = sign(
        PRIVATE_PEM,
        &user_claims("admin", &["booster-admin"], now() + 300),
    );
    let (status, body) = send(
        test_router(),
        Method::GET,
        "/api/greeting?name=Scott",
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["content"], "Hello, Scott!");
}

#[tokio::test]
async fn greeting_counter_increases_across_requests() {
    let router = test_router();
    let token = sign(
        PRIVATE_PEM,
        &user_claims("admin", &["booster-admin"], now() + 300),
    );

    let (_, first) = send(router.clone(), Method::GET, "/api/greeting", Some(&token)).await;
    let (_, second) = send(router, Method::GET, "/api/greeting", Some(&token)).await;

    assert_eq!(first["id"], 1);
    assert_eq!(second["id"], 2);
}

#[tokio::test]
async fn gate_covers_non_get_methods_on_the_path() {
    let (status, _) = send(test_router(), Method::POST, "/api/greeting", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn health_is_open() {
    let (status, body) = send(test_router(), Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("OK".into()));
}

#[tokio::test]
async fn sso_client_config_is_served() {
    let (status, body) = send(test_router(), Method::GET, "/keycloak.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["realm"], "master");
    assert_eq!(body["ssl-required"], "external");
    assert_eq!(body["credentials"]["secret"], "demo-secret");
}

#[tokio::test]
async fn unset_sso_values_are_served_as_null() {
    let auth = AuthService::new(PUBLIC_PEM, 0).unwrap();
    let state = AppState::new(auth, "realm_access/roles", SsoClientConfig::default());
    let router = app::build_router(state, "webroot");

    let (status, body) = send(router, Method::GET, "/keycloak.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["realm"].is_null());
    assert!(body["credentials"]["secret"].is_null());
    assert_eq!(body["ssl-required"], "external");
}

#[tokio::test]
async fn static_fallback_is_get_only() {
    let (status, _) = send(test_router(), Method::POST, "/index.html", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}
