/*
 * Responsibility
 * - GET /api/greeting (protected; the gate runs before this handler)
 * - name query param, default "World"; monotonically increasing id
 */
use std::sync::atomic::Ordering;

use axum::{
    Extension, Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};

use crate::middleware::auth::access::VerifiedClaims;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GreetingParams {
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct Greeting {
    pub id: u64,
    pub content: String,
}

pub async fn greeting(
    State(state): State<AppState>,
    Query(params): Query<GreetingParams>,
    Extension(claims): Extension<VerifiedClaims>,
) -> Json<Greeting> {
    let name = params.name.as_deref().unwrap_or("World");
    let id = state.greeting_counter.fetch_add(1, Ordering::Relaxed) + 1;

    if let Some(sub) = claims.0.get("sub").and_then(|v| v.as_str()) {
        tracing::debug!(sub, id, "serving greeting");
    }

    Json(Greeting {
        id,
        content: format!("Hello, {}!", name),
    })
}
