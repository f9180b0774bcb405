use auth::AccessToken;
use auth::RefreshToken;
use chrono::Duration;

use crate::user::models::User;

/// Command to log a user in
#[derive(Debug)]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
    /// Requested access token lifetime, bounded by [`AccessTokenLifetime`]
    pub expires_in_seconds: Option<i64>,
}

/// Outcome of a successful login
#[derive(Debug)]
pub struct Session {
    pub user: User,
    pub access_token: AccessToken,
    pub refresh_token: RefreshToken,
}

/// Access token lifetime policy.
///
/// Missing, non-positive and over-long requests all fall back to the maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessTokenLifetime {
    max: Duration,
}

impl AccessTokenLifetime {
    pub const DEFAULT_MAX_SECONDS: i64 = 3600;

    /// Values beyond the `Duration` range saturate to `Duration::MAX`.
    pub fn new(max_seconds: i64) -> Self {
        Self {
            max: Duration::try_seconds(max_seconds).unwrap_or(Duration::MAX),
        }
    }

    pub fn max(&self) -> Duration {
        self.max
    }

    pub fn resolve(&self, requested_seconds: Option<i64>) -> Duration {
        match requested_seconds {
            Some(seconds) if seconds > 0 && seconds <= self.max.num_seconds() => {
                Duration::seconds(seconds)
            }
            _ => self.max,
        }
    }
}

impl Default for AccessTokenLifetime {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_SECONDS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_lifetime() {
        let lifetime = AccessTokenLifetime::default();

        assert_eq!(lifetime.resolve(None), Duration::seconds(3600));
        assert_eq!(lifetime.resolve(Some(0)), Duration::seconds(3600));
        assert_eq!(lifetime.resolve(Some(-5)), Duration::seconds(3600));
        assert_eq!(lifetime.resolve(Some(7200)), Duration::seconds(3600));
        assert_eq!(lifetime.resolve(Some(3600)), Duration::seconds(3600));
        assert_eq!(lifetime.resolve(Some(60)), Duration::seconds(60));
    }

    #[test]
    fn test_huge_maximum_does_not_panic() {
        let lifetime = AccessTokenLifetime::new(i64::MAX);

        assert_eq!(lifetime.max(), Duration::MAX);
        assert_eq!(lifetime.resolve(Some(7200)), Duration::seconds(7200));
    }
}
