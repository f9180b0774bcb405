use async_trait::async_trait;
use auth::AccessToken;
use auth::RefreshTokenRecord;
use chrono::DateTime;
use chrono::Utc;

use crate::session::errors::SessionError;
use crate::session::models::LoginCommand;
use crate::session::models::Session;

/// Port for session domain service operations.
#[async_trait]
pub trait SessionServicePort: Send + Sync + 'static {
    /// Verify email and password, then open a session.
    ///
    /// # Errors
    /// * `UnknownEmail` - No user with this email
    /// * `Authentication` - Wrong password or token minting failed
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, command: LoginCommand) -> Result<Session, SessionError>;

    /// Exchange a refresh token for a new access token.
    ///
    /// # Errors
    /// * `RefreshTokenNotFound` - Token was never issued
    /// * `Authentication` - Token revoked or expired
    async fn refresh(&self, refresh_token: &str) -> Result<AccessToken, SessionError>;

    /// Revoke a refresh token. Unknown and already revoked tokens are accepted.
    async fn revoke(&self, refresh_token: &str) -> Result<(), SessionError>;
}

/// Persistence operations for refresh tokens.
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync + 'static {
    async fn create(&self, record: RefreshTokenRecord) -> Result<(), SessionError>;

    async fn find_by_token(&self, token: &str)
        -> Result<Option<RefreshTokenRecord>, SessionError>;

    /// Set `revoked_at` unless it is already set.
    async fn revoke(&self, token: &str, at: DateTime<Utc>) -> Result<(), SessionError>;
}
