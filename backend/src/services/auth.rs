//! Signup, login and session resolution
//!
//! Password hashing and verification run on the blocking thread pool.

use crate::auth::{PasswordService, SessionTokenManager};
use crate::error::ApiError;
use crate::metrics;
use crate::repositories::{AccountStore, StoreError};
use taskboard_shared::validation::validate_auth_request;
use taskboard_shared::{AuthError, AuthRequest, PublicUser};
use tracing::{debug, info, warn};

/// Authentication service
pub struct AuthService;

impl AuthService {
    /// Register a new account
    ///
    /// A taken email fails with [`AuthError::DuplicateIdentifier`]; the
    /// existing account is left as it was.
    pub async fn signup(
        accounts: &dyn AccountStore,
        passwords: &PasswordService,
        req: &AuthRequest,
    ) -> Result<PublicUser, ApiError> {
        validate_auth_request(req)?;

        // Hash password on blocking thread pool (CPU-intensive)
        let password_hash = passwords
            .hash_async(req.password.clone())
            .await
            .map_err(ApiError::Internal)?;

        match accounts.create(&req.email, &password_hash).await {
            Ok(user) => {
                metrics::record_signup("success");
                info!(user_id = user.id, "Account created");
                Ok(user)
            }
            Err(StoreError::Duplicate) => {
                metrics::record_signup("duplicate");
                debug!("Signup rejected: email already registered");
                Err(AuthError::DuplicateIdentifier.into())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Check credentials and issue a session token
    ///
    /// Unknown email and wrong password produce the same error.
    pub async fn login(
        accounts: &dyn AccountStore,
        tokens: &SessionTokenManager,
        req: &AuthRequest,
    ) -> Result<String, ApiError> {
        validate_auth_request(req)?;

        let Some(account) = accounts.find_by_email(&req.email).await? else {
            metrics::record_login("invalid_credentials");
            debug!("Login rejected: unknown email");
            return Err(AuthError::InvalidCredentials.into());
        };

        // Verify password on blocking thread pool (CPU-intensive)
        let valid = PasswordService::verify_async(req.password.clone(), account.password_hash)
            .await
            .map_err(|e| {
                warn!(user_id = account.id, "Stored password hash is unreadable");
                ApiError::Internal(e)
            })?;

        if !valid {
            metrics::record_login("invalid_credentials");
            debug!(user_id = account.id, "Login rejected: wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }

        let token = tokens
            .issue(account.id, &account.email)
            .map_err(ApiError::Internal)?;

        metrics::record_login("success");
        info!(user_id = account.id, "Login succeeded");
        Ok(token)
    }

    /// Resolve the account behind a presented session token
    ///
    /// The token payload alone is not trusted as an identity: the account is
    /// looked up again by id and must still exist.
    pub async fn resolve_session(
        accounts: &dyn AccountStore,
        tokens: &SessionTokenManager,
        token: Option<&str>,
    ) -> Result<PublicUser, ApiError> {
        let payload = token
            .ok_or(AuthError::Unauthenticated)
            .and_then(|t| tokens.verify(t))
            .inspect_err(|_| metrics::record_token_rejection())?;

        match accounts.find_by_id(payload.id).await? {
            Some(user) => Ok(user),
            None => {
                metrics::record_token_rejection();
                debug!(user_id = payload.id, "Session refers to a missing account");
                Err(AuthError::Unauthenticated.into())
            }
        }
    }
}
