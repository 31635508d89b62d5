//! Password hashing and verification
//!
//! New hashes use the configured algorithm (bcrypt by default). Verification
//! reads the algorithm from the stored hash itself, so accounts hashed under
//! a previous setting keep working.
//!
//! # Performance Considerations
//!
//! Both algorithms are intentionally CPU-intensive. Request handlers must use
//! the `*_async` variants, which run on the blocking thread pool.

use crate::config::{PasswordAlgorithm, PasswordConfig};
use anyhow::Result;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Password hashing service
#[derive(Debug, Clone, Copy)]
pub struct PasswordService {
    algorithm: PasswordAlgorithm,
    bcrypt_cost: u32,
}

impl PasswordService {
    pub fn new(algorithm: PasswordAlgorithm, bcrypt_cost: u32) -> Self {
        Self {
            algorithm,
            bcrypt_cost,
        }
    }

    pub fn from_config(config: &PasswordConfig) -> Self {
        Self::new(config.algorithm, config.bcrypt_cost)
    }

    /// Hash a password (blocking operation)
    ///
    /// The returned string embeds the algorithm, its cost parameters and
    /// the salt.
    pub fn hash(&self, password: &str) -> Result<String> {
        match self.algorithm {
            PasswordAlgorithm::Bcrypt => bcrypt::hash(password, self.bcrypt_cost)
                .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e)),
            PasswordAlgorithm::Argon2 => {
                let salt = SaltString::generate(&mut OsRng);
                let hash = Argon2::default()
                    .hash_password(password.as_bytes(), &salt)
                    .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;
                Ok(hash.to_string())
            }
        }
    }

    /// Hash a password asynchronously (non-blocking)
    pub async fn hash_async(&self, password: String) -> Result<String> {
        let service = *self;
        tokio::task::spawn_blocking(move || service.hash(&password))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))?
    }

    /// Verify a password against a stored hash (blocking operation)
    ///
    /// Returns `Ok(false)` on mismatch and `Err` when the stored hash cannot
    /// be parsed or carries parameters the verifier rejects.
    pub fn verify(password: &str, hash: &str) -> Result<bool> {
        if hash.starts_with("$argon2") {
            let parsed_hash = PasswordHash::new(hash)
                .map_err(|e| anyhow::anyhow!("Invalid hash format: {}", e))?;
            return match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
                Ok(()) => Ok(true),
                Err(argon2::password_hash::Error::Password) => Ok(false),
                Err(e) => Err(anyhow::anyhow!("Invalid hash parameters: {}", e)),
            };
        }
        if hash.starts_with("$2") {
            return bcrypt::verify(password, hash)
                .map_err(|e| anyhow::anyhow!("Invalid hash format: {}", e));
        }
        Err(anyhow::anyhow!("Unrecognized password hash format"))
    }

    /// Verify a password asynchronously (non-blocking)
    pub async fn verify_async(password: String, hash: String) -> Result<bool> {
        tokio::task::spawn_blocking(move || Self::verify(&password, &hash))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))?
    }
}
