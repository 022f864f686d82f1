/*
 * Responsibility
 * - Token verification + role-based authorization building blocks
 */
pub mod roles;
pub mod verifier;
