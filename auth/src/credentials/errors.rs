use thiserror::Error;

/// Error type for credential extraction.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CredentialError {
    #[error("Authorization credential not found")]
    MissingCredential,

    #[error("Unexpected authorization scheme: expected {expected}")]
    UnexpectedScheme { expected: &'static str },

    #[error("API key does not match")]
    ApiKeyMismatch,
}
