//! Outbound ports that are not repositories.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    #[error("Password must not be empty")]
    EmptySecret,

    #[error("Failed to hash password: {0}")]
    Hashing(String),
}

/// One-way transform of a plaintext secret into its stored form.
///
/// Implementations must be deterministic: login looks records up by the hash
/// of the submitted secret.
pub trait CredentialHasher: Send + Sync {
    fn hash(&self, plaintext: &str) -> Result<String, CryptoError>;
}
