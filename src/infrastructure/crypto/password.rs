//! Password hashing
//!
//! Deterministic SHA-256 over a server-side pepper and the plaintext, hex
//! encoded. Determinism is required because login looks users up by hash.

use sha2::{Digest, Sha256};

use crate::domain::{CredentialHasher, CryptoError};

pub struct Sha256Hasher {
    pepper: String,
}

impl Sha256Hasher {
    pub fn new(pepper: impl Into<String>) -> Self {
        Self {
            pepper: pepper.into(),
        }
    }
}

impl CredentialHasher for Sha256Hasher {
    fn hash(&self, plaintext: &str) -> Result<String, CryptoError> {
        if plaintext.is_empty() {
            return Err(CryptoError::EmptySecret);
        }

        let mut hasher = Sha256::new();
        hasher.update(self.pepper.as_bytes());
        hasher.update([0u8]);
        hasher.update(plaintext.as_bytes());
        Ok(hex::encode(hasher.finalize()))
    }
}
