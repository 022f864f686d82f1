/*
 * Responsibility
 * - Middleware surface (re-exports)
 */
pub mod auth;
pub mod http;
