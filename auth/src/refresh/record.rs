use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use uuid::Uuid;

use super::errors::RefreshTokenError;
use super::issuer::RefreshToken;

/// Default validity window of a refresh token.
pub const REFRESH_TOKEN_VALIDITY_DAYS: i64 = 60;

/// Persisted lifecycle of a refresh token.
///
/// The store owns creation, lookup and revocation; this type only encodes
/// the rule deciding whether a looked-up record may still be exchanged for an
/// access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshTokenRecord {
    pub token: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl RefreshTokenRecord {
    /// Build the record for a freshly generated token.
    ///
    /// # Arguments
    /// * `token` - Generated refresh token
    /// * `user_id` - Owner of the session
    /// * `issued_at` - Creation instant
    /// * `validity` - Lifetime of the token
    pub fn new(
        token: RefreshToken,
        user_id: Uuid,
        issued_at: DateTime<Utc>,
        validity: Duration,
    ) -> Self {
        Self {
            token: token.into_inner(),
            user_id,
            created_at: issued_at,
            updated_at: issued_at,
            expires_at: issued_at + validity,
            revoked_at: None,
        }
    }

    /// Check the record and return its owner.
    ///
    /// Revocation wins over expiry when both apply.
    ///
    /// # Errors
    /// * `Revoked` - `revoked_at` is set
    /// * `Expired` - `now` is not before `expires_at`
    pub fn validate(&self, now: DateTime<Utc>) -> Result<Uuid, RefreshTokenError> {
        if self.revoked_at.is_some() {
            return Err(RefreshTokenError::Revoked);
        }
        if now >= self.expires_at {
            return Err(RefreshTokenError::Expired);
        }
        Ok(self.user_id)
    }

    /// Mark the record revoked.
    ///
    /// Revocation is monotonic: revoking twice keeps the first timestamp.
    pub fn revoke(&mut self, at: DateTime<Utc>) {
        if self.revoked_at.is_none() {
            self.revoked_at = Some(at);
            self.updated_at = at;
        }
    }
}
