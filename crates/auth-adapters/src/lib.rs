//! # auth-adapters
//!
//! Implementations of `AuthenticationCheck` for the single admin credential.
//! The comparison strategy can change here without touching the services.

pub mod argon2_hash;
pub mod shared_secret;

pub use argon2_hash::{hash_password, Argon2HashCheck};
pub use shared_secret::SharedSecretCheck;

use thiserror::Error;

/// Problems with the configured admin credential, caught at startup.
#[derive(Error, Debug)]
pub enum AuthConfigError {
    #[error("admin secret must not be empty")]
    EmptySecret,

    #[error("invalid password hash: {0}")]
    InvalidHash(String),

    #[error("credential tag key rejected: {0}")]
    TagKey(#[from] hmac::digest::InvalidLength),
}
