use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    /// Entropy source or hasher failure. Not retryable.
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// The stored value is not a hash this hasher can verify.
    #[error("Malformed password hash: {0}")]
    MalformedHash(String),
}
