//! Plain shared-password check.
//!
//! The configured secret and the candidate are both fed as the *message* of
//! an HMAC-SHA256 under a fixed key, and the tags are compared with
//! `verify_slice`, which is constant-time and hides the secret's length.
//! The credential is never the HMAC key: key padding makes `secret` and
//! `secret\0` produce the same tag.

use async_trait::async_trait;
use domains::ports::AuthenticationCheck;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;

use crate::AuthConfigError;

type HmacSha256 = Hmac<Sha256>;

const TAG_KEY: &[u8] = b"note-board admin credential";

pub struct SharedSecretCheck {
    keyed: HmacSha256,
    expected_tag: Vec<u8>,
}

impl SharedSecretCheck {
    pub fn new(secret: &SecretString) -> Result<Self, AuthConfigError> {
        let secret = secret.expose_secret();
        if secret.is_empty() {
            return Err(AuthConfigError::EmptySecret);
        }
        let keyed = <HmacSha256 as Mac>::new_from_slice(TAG_KEY)?;
        let expected_tag = tag(keyed.clone(), secret);
        Ok(Self {
            keyed,
            expected_tag,
        })
    }
}

fn tag(mut mac: HmacSha256, message: &str) -> Vec<u8> {
    mac.update(message.as_bytes());
    mac.finalize().into_bytes().to_vec()
}

#[async_trait]
impl AuthenticationCheck for SharedSecretCheck {
    async fn verify(&self, credential: &str) -> bool {
        let mut mac = self.keyed.clone();
        mac.update(credential.as_bytes());
        mac.verify_slice(&self.expected_tag).is_ok()
    }
}
