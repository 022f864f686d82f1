/*
 * Responsibility
 * - Domain services (no HTTP types in here)
 */
pub mod auth;
