use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::TokenError;

/// Issuer stamped into every access token.
pub const ISSUER: &str = "chirpy";

/// Registered claims carried by an access token.
///
/// Only the four claims the service relies on. All are required when
/// decoding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Issuer
    pub iss: String,

    /// Subject (user identifier)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for a user, valid for `ttl` from `now`.
    ///
    /// # Arguments
    /// * `user_id` - Unique user identifier
    /// * `now` - Issuance instant
    /// * `ttl` - Lifetime of the token (may be negative, producing an already expired token)
    ///
    /// # Returns
    /// Claims with iss, sub, iat and exp set
    ///
    /// # Errors
    /// * `EncodingFailed` - `now + ttl` is outside the representable date range
    pub fn for_user(
        user_id: impl ToString,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<Self, TokenError> {
        let expires_at = now.checked_add_signed(ttl).ok_or_else(|| {
            TokenError::EncodingFailed(format!("Token lifetime out of range: {}", ttl))
        })?;

        Ok(Self {
            iss: ISSUER.to_string(),
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        })
    }

    /// Check if the token is expired.
    ///
    /// A token is only valid strictly before its `exp` second.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp <= current_timestamp
    }
}
