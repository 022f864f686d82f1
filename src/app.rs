/*
 * Responsibility
 * - Config load -> dependency construction -> Router assembly
 * - Middleware application (trace/request-id/timeout + auth gate via routes)
 * - axum::serve() startup
 */
use anyhow::{Context, Result, anyhow};
use axum::Router;
use tracing_subscriber::EnvFilter;

use crate::{api, config::Config, middleware, services::auth::verifier::AuthService, state::AppState};

pub async fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env().context("configuration")?;

    // A key that does not parse must abort startup, never degrade into
    // accepting or rejecting all traffic at runtime.
    let auth = AuthService::new(&config.realm_public_key_pem, config.token_leeway_seconds)
        .map_err(|e| anyhow!("REALM_PUBLIC_KEY: {}", e))?;

    let state = AppState::new(auth, &config.role_claim_path, config.sso.clone());
    let app = build_router(state, &config.static_dir);

    tracing::info!(addr = %config.addr, "listening");
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(state: AppState, static_dir: &str) -> Router {
    middleware::http::apply(api::routes(state, static_dir))
}
