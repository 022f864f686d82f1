/*
 * Responsibility
 * - Environment / .env configuration loading (realm key, role path, SSO client config)
 * - Validation of required values (missing key => startup failure, never per-request)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

/// SSO client settings served verbatim to the web client via `/keycloak.json`.
///
/// These are opaque to this service; absent variables are served as JSON
/// null, matching the original deployment behavior.
#[derive(Debug, Clone, Default)]
pub struct SsoClientConfig {
    pub realm: Option<String>,
    pub auth_server_url: Option<String>,
    pub resource: Option<String>,
    pub secret: Option<String>,
}

pub struct Config {
    pub addr: SocketAddr,

    /// PEM-encoded RS256 public key of the token issuer.
    pub realm_public_key_pem: String,
    /// Where role claims live inside the token payload (e.g. `realm_access/roles`).
    pub role_claim_path: String,
    /// Clock-skew tolerance for `exp`/`nbf` checks, in seconds.
    pub token_leeway_seconds: u64,

    pub sso: SsoClientConfig,
    pub static_dir: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(8080);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let realm_public_key = std::env::var("REALM_PUBLIC_KEY")
            .map_err(|_| ConfigError::Missing("REALM_PUBLIC_KEY"))?
            .replace("\\n", "\n");
        if realm_public_key.trim().is_empty() {
            return Err(ConfigError::Missing("REALM_PUBLIC_KEY"));
        }
        let realm_public_key_pem = normalize_public_key_pem(&realm_public_key);

        let role_claim_path = std::env::var("ROLE_CLAIM_PATH")
            .unwrap_or_else(|_| "realm_access/roles".to_string());

        // No skew tolerance by default: an expired token is expired. Deployments
        // with drifting clocks can opt in via the env var.
        let token_leeway_seconds = std::env::var("TOKEN_LEEWAY_SECONDS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(0);

        let sso = SsoClientConfig {
            realm: std::env::var("REALM").ok(),
            auth_server_url: std::env::var("SSO_AUTH_SERVER_URL").ok(),
            resource: std::env::var("CLIENT_ID").ok(),
            secret: std::env::var("SECRET").ok(),
        };

        let static_dir = std::env::var("STATIC_DIR").unwrap_or_else(|_| "webroot".to_string());

        Ok(Self {
            addr,
            realm_public_key_pem,
            role_claim_path,
            token_leeway_seconds,
            sso,
            static_dir,
        })
    }
}

/// Keycloak exposes the realm key as bare base64 without PEM armor; wrap it
/// so both armored and bare forms load. Armored input passes through as-is.
fn normalize_public_key_pem(key: &str) -> String {
    let key = key.trim();
    if key.contains("-----BEGIN") {
        return key.to_string();
    }

    let body: String = key.chars().filter(|c| !c.is_whitespace()).collect();
    let mut pem = String::from("-----BEGIN PUBLIC KEY-----\n");
    for chunk in body.as_bytes().chunks(64) {
        // base64 is ASCII, the chunk boundary cannot split a char
        pem.push_str(std::str::from_utf8(chunk).unwrap_or_default());
        pem.push('\n');
    }
    pem.push_str("-----END PUBLIC KEY-----\n");
    pem
}
