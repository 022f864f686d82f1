//! Bearer-token gate: header extraction → verification → role check.
//!
//! Responsibility:
//! - Extract `Authorization: Bearer <jwt>` and run the auth pipeline.
//! - Map the outcome to HTTP: 401 (unauthenticated), 403 (authenticated but
//!   missing the required role), or pass-through to the next handler.
//! - On success, put the verified claims into request extensions for
//!   downstream handlers.
//!
//! Failure reasons are logged via tracing only; 401 bodies stay opaque so
//! clients cannot distinguish malformed / expired / bad-signature tokens.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::error::AppError;
use crate::services::auth::roles::{extract_roles, is_authorized};
use crate::services::auth::verifier::{AuthService, ClaimSet};
use crate::state::AppState;

/// Per-request authorization outcome. Terminal; nothing here is retried.
#[derive(Debug)]
pub enum AuthOutcome {
    /// Token missing, malformed, expired, or signed with the wrong key.
    Unauthenticated,
    /// Token verified, but the required role is absent.
    Unauthorized,
    /// Token verified and the required role is present.
    Authorized(ClaimSet),
}

/// Verified claims of the current request, available to handlers behind the
/// gate via `Extension`.
#[derive(Clone, Debug)]
pub struct VerifiedClaims(pub Arc<ClaimSet>);

/// The pipeline itself: header → verify → extract roles → decide.
///
/// Synchronous on purpose; nothing in here blocks (the key is resident in
/// memory), so the async surface is only the middleware wrapper below.
pub fn authorize(
    auth: &AuthService,
    role_path: &str,
    headers: &HeaderMap,
    required_role: &str,
) -> AuthOutcome {
    let Some(token) = bearer_token(headers) else {
        return AuthOutcome::Unauthenticated;
    };

    let claims = match auth.verify(token) {
        Ok(claims) => claims,
        Err(err) => {
            tracing::warn!(error = ?err, "token verification failed");
            return AuthOutcome::Unauthenticated;
        }
    };

    let roles = extract_roles(&claims, role_path);
    if !is_authorized(&roles, required_role) {
        tracing::warn!(required = required_role, "required role missing");
        return AuthOutcome::Unauthorized;
    }

    AuthOutcome::Authorized(claims)
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Gate every route of `router` behind `required_role`.
///
/// Applied with `layer` (not `route_layer`) so the gate is scoped by path,
/// not by verb: any method on a gated path is checked before method routing.
pub fn apply(
    router: Router<AppState>,
    state: AppState,
    required_role: &'static str,
) -> Router<AppState> {
    // axum 0.8: from_fn cannot take a State extractor, so pass state explicitly
    router.layer(middleware::from_fn_with_state(
        state,
        move |state: State<AppState>, req: Request<Body>, next: Next| {
            access_middleware(state, required_role, req, next)
        },
    ))
}

async fn access_middleware(
    State(state): State<AppState>,
    required_role: &'static str,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    match authorize(
        &state.auth,
        &state.role_claim_path,
        req.headers(),
        required_role,
    ) {
        AuthOutcome::Unauthenticated => Err(AppError::Unauthorized),
        AuthOutcome::Unauthorized => Err(AppError::Forbidden),
        AuthOutcome::Authorized(claims) => {
            // middleware → handler hand-off
            req.extensions_mut()
                .insert(VerifiedClaims(Arc::new(claims)));
            Ok(next.run(req).await)
        }
    }
}
