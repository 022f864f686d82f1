pub mod greeting;
pub mod health;
pub mod sso_config;
