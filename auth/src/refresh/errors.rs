use thiserror::Error;

/// Error type for refresh token operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RefreshTokenError {
    /// The OS random source failed. Fatal, never retried.
    #[error("Entropy source unavailable: {0}")]
    EntropyUnavailable(String),

    #[error("Refresh token is expired")]
    Expired,

    #[error("Refresh token has been revoked")]
    Revoked,
}
