use std::sync::Arc;

use async_trait::async_trait;
use auth::AccessToken;
use auth::Authenticator;
use auth::RefreshTokenRecord;
use chrono::Duration;
use chrono::Utc;

use crate::session::errors::SessionError;
use crate::session::models::AccessTokenLifetime;
use crate::session::models::LoginCommand;
use crate::session::models::Session;
use crate::session::ports::RefreshTokenRepository;
use crate::session::ports::SessionServicePort;
use crate::user::models::EmailAddress;
use crate::user::ports::UserRepository;

/// Domain service implementation for session operations.
pub struct SessionService<UR, RR>
where
    UR: UserRepository,
    RR: RefreshTokenRepository,
{
    users: Arc<UR>,
    refresh_tokens: Arc<RR>,
    authenticator: Arc<Authenticator>,
    lifetime: AccessTokenLifetime,
    refresh_validity: Duration,
}

impl<UR, RR> SessionService<UR, RR>
where
    UR: UserRepository,
    RR: RefreshTokenRepository,
{
    /// Create a new session service.
    ///
    /// # Arguments
    /// * `users` - User lookup by email
    /// * `refresh_tokens` - Refresh token store
    /// * `authenticator` - Shared authentication core
    /// * `lifetime` - Access token lifetime policy
    /// * `refresh_validity` - Lifetime of issued refresh tokens
    pub fn new(
        users: Arc<UR>,
        refresh_tokens: Arc<RR>,
        authenticator: Arc<Authenticator>,
        lifetime: AccessTokenLifetime,
        refresh_validity: Duration,
    ) -> Self {
        Self {
            users,
            refresh_tokens,
            authenticator,
            lifetime,
            refresh_validity,
        }
    }
}

#[async_trait]
impl<UR, RR> SessionServicePort for SessionService<UR, RR>
where
    UR: UserRepository,
    RR: RefreshTokenRepository,
{
    async fn login(&self, command: LoginCommand) -> Result<Session, SessionError> {
        let user = match EmailAddress::new(command.email.clone()) {
            Ok(email) => self.users.find_by_email(&email).await?,
            Err(_) => None,
        };

        let Some(user) = user else {
            let err = self.authenticator.reject_unknown_user(&command.password);
            tracing::warn!(error = %err, "Login rejected: unknown email");
            return Err(SessionError::UnknownEmail(command.email));
        };

        let ttl = self.lifetime.resolve(command.expires_in_seconds);
        let result = self
            .authenticator
            .authenticate(&command.password, &user.password_hash, user.id.0, ttl)
            .map_err(|err| {
                tracing::warn!(user_id = %user.id, error = %err, "Login rejected");
                SessionError::from(err)
            })?;

        let record = RefreshTokenRecord::new(
            result.refresh_token.clone(),
            user.id.0,
            Utc::now(),
            self.refresh_validity,
        );
        self.refresh_tokens.create(record).await?;

        tracing::info!(user_id = %user.id, ttl_seconds = ttl.num_seconds(), "User logged in");

        Ok(Session {
            user,
            access_token: result.access_token,
            refresh_token: result.refresh_token,
        })
    }

    async fn refresh(&self, refresh_token: &str) -> Result<AccessToken, SessionError> {
        let Some(record) = self.refresh_tokens.find_by_token(refresh_token).await? else {
            tracing::warn!("Refresh rejected: unknown token");
            return Err(SessionError::RefreshTokenNotFound);
        };

        let access_token = self
            .authenticator
            .refresh(&record, self.lifetime.max())
            .map_err(|err| {
                tracing::warn!(user_id = %record.user_id, error = %err, "Refresh rejected");
                SessionError::from(err)
            })?;

        tracing::debug!(user_id = %record.user_id, "Access token refreshed");

        Ok(access_token)
    }

    async fn revoke(&self, refresh_token: &str) -> Result<(), SessionError> {
        self.refresh_tokens.revoke(refresh_token, Utc::now()).await?;
        tracing::info!("Refresh token revoked");

        Ok(())
    }
}
