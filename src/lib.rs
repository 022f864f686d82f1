/*
 * Responsibility
 * - Module wiring; the binary and the integration tests both build on this
 */
pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;
