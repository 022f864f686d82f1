/*
 * Responsibility
 * - URL structure + which routes sit behind the auth gate
 * - Required-role wiring happens here, per protected resource
 */
use axum::{
    Router,
    routing::{get, get_service},
};
use tower_http::services::ServeDir;

use crate::api::handlers::{greeting::greeting, health::health, sso_config::sso_config};
use crate::middleware;
use crate::state::AppState;

/// Role required to reach the greeting resource.
pub const GREETING_REQUIRED_ROLE: &str = "booster-admin";

pub fn routes(state: AppState, static_dir: &str) -> Router {
    // The gate covers the whole /api sub-router, so non-GET methods on
    // /api/greeting are also checked before method routing.
    let api = Router::new().route("/greeting", get(greeting));
    let api = middleware::auth::access::apply(api, state.clone(), GREETING_REQUIRED_ROLE);

    Router::new()
        .route("/health", get(health))
        .route("/keycloak.json", get(sso_config))
        .nest("/api", api)
        // web client assets, GET/HEAD only
        .fallback_service(get_service(ServeDir::new(static_dir)))
        .with_state(state)
}
