/*
 * Responsibility
 * - Shared context bound to the Router (AppState)
 * - Clone is cheap (Arc interior); nothing here is mutated after startup
 *   except the greeting counter
 */
use std::sync::Arc;
use std::sync::atomic::AtomicU64;

use crate::config::SsoClientConfig;
use crate::services::auth::verifier::AuthService;

#[derive(Clone, Debug)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub role_claim_path: Arc<str>,
    pub sso: Arc<SsoClientConfig>,
    pub greeting_counter: Arc<AtomicU64>,
}

impl AppState {
    pub fn new(auth: AuthService, role_claim_path: &str, sso: SsoClientConfig) -> Self {
        Self {
            auth: Arc::new(auth),
            role_claim_path: Arc::from(role_claim_path),
            sso: Arc::new(sso),
            greeting_counter: Arc::new(AtomicU64::new(0)),
        }
    }
}
