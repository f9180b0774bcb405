use auth::AuthenticationError;
use thiserror::Error;

use crate::user::errors::UserError;

/// Top-level error for login, refresh and revocation
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    #[error("Authentication failed: {0}")]
    Authentication(#[from] AuthenticationError),

    #[error("No account for email: {0}")]
    UnknownEmail(String),

    #[error("Refresh token not found")]
    RefreshTokenNotFound,

    #[error("User error: {0}")]
    User(#[from] UserError),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl SessionError {
    /// Whether the caller failed to prove who they are.
    pub fn is_unauthorized(&self) -> bool {
        match self {
            SessionError::Authentication(err) => err.is_unauthorized(),
            SessionError::UnknownEmail(_) | SessionError::RefreshTokenNotFound => true,
            SessionError::User(_) | SessionError::DatabaseError(_) | SessionError::Unknown(_) => {
                false
            }
        }
    }
}

impl From<anyhow::Error> for SessionError {
    fn from(err: anyhow::Error) -> Self {
        SessionError::Unknown(err.to_string())
    }
}
