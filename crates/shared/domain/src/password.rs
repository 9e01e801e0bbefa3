//! Password digest value object.
//!
//! Stored credentials are the base64 encoding of an unsalted SHA-256 digest of
//! the UTF-8 plaintext. Existing stored hashes depend on this exact format, so
//! it stays as it is until a migration to a salted, iterated scheme (argon2 or
//! similar) is planned. Do not reuse this scheme for new credential stores.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use sha2::{Digest, Sha256};

/// Hashed password as it is persisted.
#[derive(Clone)]
pub struct Password {
    hash: String,
}

// Don't expose hash in debug output (security)
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Hash a plaintext password.
    ///
    /// Deterministic: the same plaintext always yields the same hash.
    pub fn hash(plain_text: &str) -> Self {
        Self {
            hash: digest(plain_text),
        }
    }

    /// Wrap an existing hash (from storage).
    pub fn from_hash(hash: impl Into<String>) -> Self {
        Self { hash: hash.into() }
    }

    /// Get the hash string for storage.
    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// Consume and return the hash string.
    pub fn into_string(self) -> String {
        self.hash
    }

    /// Verify a plaintext password against this hash.
    pub fn verify(&self, plain_text: &str) -> bool {
        digest(plain_text) == self.hash
    }
}

fn digest(plain_text: &str) -> String {
    STANDARD.encode(Sha256::digest(plain_text.as_bytes()))
}

impl From<Password> for String {
    fn from(password: Password) -> Self {
        password.hash
    }
}

impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
    }
}

impl Eq for Password {}
