//! Session token issuance and verification
//!
//! Tokens are HS256 JWTs carrying the account id and email. There is no
//! server-side revocation: a token stays valid until its `exp` passes, and
//! logout only clears the client's cookie.

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use taskboard_shared::AuthError;
use tracing::debug;

/// JWT claims as they appear on the wire
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Account id
    pub id: i32,
    /// Account email at issuance
    pub email: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Longest accepted token lifetime (one day)
pub const MAX_TOKEN_EXPIRY_SECS: i64 = 24 * 60 * 60;

/// Identity carried by a verified token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPayload {
    pub id: i32,
    pub email: String,
}

/// Pre-computed JWT keys for efficient token operations
/// These are expensive to create, so we cache them in AppState
#[derive(Clone)]
pub struct JwtKeys {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

impl JwtKeys {
    /// Create new JWT keys from secret
    /// This should be called once at startup
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret)),
            decoding: Arc::new(DecodingKey::from_secret(secret)),
        }
    }
}

/// Issues and verifies session tokens
///
/// Cheap to clone; the keys are shared behind `Arc` and never change after
/// construction.
#[derive(Clone)]
pub struct SessionTokenManager {
    keys: JwtKeys,
    validation: Arc<Validation>,
    expiry: Duration,
}

impl std::fmt::Debug for SessionTokenManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionTokenManager")
            .field("expiry_secs", &self.expiry.num_seconds())
            .finish()
    }
}

impl SessionTokenManager {
    /// Create a manager from the signing secret
    ///
    /// Fails with [`AuthError::Configuration`] when the secret is empty or
    /// the expiry is outside `1..=MAX_TOKEN_EXPIRY_SECS`.
    /// Call this once at application startup and store it in AppState.
    pub fn new(secret: &SecretString, expiry_secs: i64) -> Result<Self, AuthError> {
        let secret = secret.expose_secret();
        if secret.trim().is_empty() {
            return Err(AuthError::Configuration(
                "signing secret is missing".to_string(),
            ));
        }
        let expiry = Duration::try_seconds(expiry_secs)
            .filter(|_| (1..=MAX_TOKEN_EXPIRY_SECS).contains(&expiry_secs))
            .ok_or_else(|| {
                AuthError::Configuration(format!(
                    "token expiry must be between 1 and {} seconds",
                    MAX_TOKEN_EXPIRY_SECS
                ))
            })?;

        // Expiry is checked by hand against an explicit clock, with no leeway.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;

        Ok(Self {
            keys: JwtKeys::new(secret.as_bytes()),
            validation: Arc::new(validation),
            expiry,
        })
    }

    /// Issue a token for an account, valid from now
    #[inline]
    pub fn issue(&self, account_id: i32, email: &str) -> Result<String> {
        self.issue_at(account_id, email, Utc::now())
    }

    /// Issue a token as if the current time were `now`
    pub fn issue_at(&self, account_id: i32, email: &str, now: DateTime<Utc>) -> Result<String> {
        let expires_at = now
            .checked_add_signed(self.expiry)
            .ok_or_else(|| anyhow::anyhow!("Session token expiry is out of range"))?;
        let claims = Claims {
            id: account_id,
            email: email.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.keys.encoding)
            .map_err(|e| anyhow::anyhow!("Failed to generate session token: {}", e))
    }

    /// Verify a token against the current time
    #[inline]
    pub fn verify(&self, token: &str) -> Result<TokenPayload, AuthError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify a token as if the current time were `now`
    ///
    /// Every failure collapses to [`AuthError::Unauthenticated`]; the reason
    /// is only logged.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<TokenPayload, AuthError> {
        if token.is_empty() {
            debug!("Rejected session token: empty");
            return Err(AuthError::Unauthenticated);
        }

        let claims = decode::<Claims>(token, &self.keys.decoding, &self.validation)
            .map_err(|e| {
                let reason = match e.kind() {
                    ErrorKind::InvalidSignature => "invalid signature",
                    ErrorKind::InvalidToken
                    | ErrorKind::Base64(_)
                    | ErrorKind::Json(_)
                    | ErrorKind::Utf8(_) => "malformed",
                    ErrorKind::InvalidAlgorithm => "unexpected algorithm",
                    ErrorKind::MissingRequiredClaim(_) => "missing claim",
                    _ => "invalid",
                };
                debug!(reason, "Rejected session token");
                AuthError::Unauthenticated
            })?
            .claims;

        if claims.exp <= now.timestamp() {
            debug!(account_id = claims.id, "Rejected session token: expired");
            return Err(AuthError::Unauthenticated);
        }

        Ok(TokenPayload {
            id: claims.id,
            email: claims.email,
        })
    }

    /// Token lifetime in seconds, for the cookie max-age
    #[inline]
    pub fn expiry_secs(&self) -> i64 {
        self.expiry.num_seconds()
    }
}
