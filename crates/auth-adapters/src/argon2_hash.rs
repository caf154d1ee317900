//! # Argon2 admin check
//!
//! Verifies the admin password against a stored Argon2 PHC string, so the
//! plaintext never has to live in the configuration.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use async_trait::async_trait;
use domains::ports::AuthenticationCheck;
use tracing::error;

use crate::AuthConfigError;

pub struct Argon2HashCheck {
    /// PHC string, e.g. `$argon2id$v=19$m=19456,t=2,p=1$...`
    hash: String,
}

impl Argon2HashCheck {
    /// Fails early if `hash` is not a parseable PHC string.
    pub fn new(hash: impl Into<String>) -> Result<Self, AuthConfigError> {
        let hash = hash.into();
        PasswordHash::new(&hash).map_err(|err| AuthConfigError::InvalidHash(err.to_string()))?;
        Ok(Self { hash })
    }
}

#[async_trait]
impl AuthenticationCheck for Argon2HashCheck {
    async fn verify(&self, credential: &str) -> bool {
        let hash = self.hash.clone();
        let credential = credential.to_owned();

        // Argon2 is deliberately slow; keep it off the async workers.
        let outcome = tokio::task::spawn_blocking(move || {
            let parsed_hash = match PasswordHash::new(&hash) {
                Ok(p) => p,
                Err(_) => return false,
            };
            Argon2::default()
                .verify_password(credential.as_bytes(), &parsed_hash)
                .is_ok()
        })
        .await;

        outcome.unwrap_or_else(|err| {
            error!(error = %err, "password verification task failed");
            false
        })
    }
}

/// Hashes `password` with a random salt and default Argon2id parameters.
pub fn hash_password(password: &str) -> Result<String, AuthConfigError> {
    if password.is_empty() {
        return Err(AuthConfigError::EmptySecret);
    }
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| AuthConfigError::InvalidHash(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn verifies_against_generated_hash() {
        let hash = hash_password("s3cret board").unwrap();
        assert!(hash.starts_with("$argon2id$"));

        let check = Argon2HashCheck::new(hash).unwrap();
        assert!(check.verify("s3cret board").await);
        assert!(!check.verify("s3cret").await);
        assert!(!check.verify("").await);
    }

    #[test]
    fn rejects_malformed_hash_up_front() {
        let result = Argon2HashCheck::new("plaintext-password");
        assert!(matches!(result, Err(AuthConfigError::InvalidHash(_))));
    }

    #[test]
    fn refuses_to_hash_an_empty_password() {
        assert!(matches!(hash_password(""), Err(AuthConfigError::EmptySecret)));
    }
}
