/*
 * Responsibility
 * - GET /keycloak.json: dynamic SSO client config so the web client can
 *   reach the same auth server this service trusts
 */
use axum::{Json, extract::State};
use serde_json::json;

use crate::state::AppState;

pub async fn sso_config(State(state): State<AppState>) -> Json<serde_json::Value> {
    // Unset values serialize as null, exactly what the client saw upstream.
    Json(json!({
        "realm": &state.sso.realm,
        "auth-server-url": &state.sso.auth_server_url,
        "ssl-required": "external",
        "resource": &state.sso.resource,
        "credentials": { "secret": &state.sso.secret },
    }))
}
