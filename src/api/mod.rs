/*
 * Responsibility
 * - API surface (routes() re-export)
 */
pub mod handlers;
mod routes;

pub use routes::{GREETING_REQUIRED_ROLE, routes};
