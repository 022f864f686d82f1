//! RS256 bearer-token verifier.
//!
//! Responsibility:
//! - Verify token structure + signature against the realm public key.
//! - Enforce temporal claims (`exp` in the future, `nbf` not in the future).
//! - Surface a typed error so logs/tests can tell failure modes apart;
//!   callers collapse all of them to 401.
//!
//! Notes:
//! - Key material is intentionally not printable via Debug.
//! - No issuer/audience pinning here: the original service trusts any token
//!   signed by the realm key.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use std::{error::Error as StdError, fmt};

/// Decoded, signature-verified token payload.
pub type ClaimSet = serde_json::Map<String, serde_json::Value>;

// Errors returned by token verification. All collapse to "unauthenticated"
// at the HTTP boundary; the split exists for observability and tests.
#[derive(Debug)]
pub enum VerificationError {
    Malformed(jsonwebtoken::errors::Error),
    SignatureInvalid,
    Expired,
    NotYetValid,
}

impl fmt::Display for VerificationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed(e) => write!(f, "malformed token: {}", e),
            Self::SignatureInvalid => write!(f, "token signature invalid"),
            Self::Expired => write!(f, "token expired"),
            Self::NotYetValid => write!(f, "token not yet valid"),
        }
    }
}

impl StdError for VerificationError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Malformed(e) => Some(e),
            _ => None,
        }
    }
}

impl From<jsonwebtoken::errors::Error> for VerificationError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        match e.kind() {
            ErrorKind::ExpiredSignature => Self::Expired,
            ErrorKind::ImmatureSignature => Self::NotYetValid,
            ErrorKind::InvalidSignature => Self::SignatureInvalid,
            _ => Self::Malformed(e),
        }
    }
}

/// RS256 access-token verifier, built once at startup from the realm key.
#[derive(Clone)]
pub struct AuthService {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl fmt::Debug for AuthService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print key material
        f.debug_struct("AuthService")
            .field("validation", &self.validation)
            .finish()
    }
}

impl AuthService {
    /// `public_key_pem` must be a PEM-armored RSA public key.
    ///
    /// An unparseable key is a configuration error; the process must not
    /// start with one.
    pub fn new(public_key_pem: &str, leeway_seconds: u64) -> Result<Self, String> {
        let decoding_key = DecodingKey::from_rsa_pem(public_key_pem.as_bytes())
            .map_err(|e| format!("invalid RS256 public key pem: {}", e))?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.validate_nbf = true;
        validation.validate_aud = false;
        validation.leeway = leeway_seconds;

        Ok(Self {
            decoding_key,
            validation,
        })
    }

    /// Verify and decode a bearer token.
    ///
    /// `jsonwebtoken::Validation` checks the signature, `exp` (required) and
    /// `nbf` (when present). The payload must be a JSON object.
    pub fn verify(&self, token: &str) -> Result<ClaimSet, VerificationError> {
        let data = jsonwebtoken::decode::<serde_json::Value>(
            token,
            &self.decoding_key,
            &self.validation,
        )?;

        match data.claims {
            serde_json::Value::Object(claims) => Ok(claims),
            _ => Err(VerificationError::Malformed(
                ErrorKind::InvalidToken.into(),
            )),
        }
    }
}
