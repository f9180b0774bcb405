//! Authentication core for Chirpy
//!
//! Turns passwords and bearer credentials into a verified user identifier:
//! - Password hashing (Argon2id)
//! - Access tokens (HS256 JWT, stateless)
//! - Refresh tokens (opaque, lifecycle persisted by the caller)
//! - `Authorization` header parsing
//!
//! Every component is a plain value without interior state, so a single
//! instance can be shared between request handlers.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! ```
//!
//! ## Access Tokens
//! ```
//! use auth::AccessTokenCodec;
//! use chrono::Duration;
//! use uuid::Uuid;
//!
//! let codec = AccessTokenCodec::new(b"secret_key_at_least_32_bytes_long!");
//! let user_id = Uuid::new_v4();
//! let token = codec.issue(user_id, Duration::hours(1)).unwrap();
//! assert_eq!(codec.verify(token.as_str()).unwrap(), user_id);
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, RefreshTokenRecord, REFRESH_TOKEN_VALIDITY_DAYS};
//! use chrono::{Duration, Utc};
//! use uuid::Uuid;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!");
//! let user_id = Uuid::new_v4();
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and mint both tokens
//! let result = auth
//!     .authenticate("password123", &hash, user_id, Duration::hours(1))
//!     .unwrap();
//!
//! // Persist the refresh token record, later exchange it
//! let record = RefreshTokenRecord::new(
//!     result.refresh_token,
//!     user_id,
//!     Utc::now(),
//!     Duration::days(REFRESH_TOKEN_VALIDITY_DAYS),
//! );
//! let access_token = auth.refresh(&record, Duration::hours(1)).unwrap();
//! assert_eq!(auth.validate_token(access_token.as_str()).unwrap(), user_id);
//! ```

pub mod authenticator;
pub mod credentials;
pub mod jwt;
pub mod password;
pub mod refresh;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use credentials::CredentialError;
pub use credentials::CredentialExtractor;
pub use jwt::AccessToken;
pub use jwt::AccessTokenCodec;
pub use jwt::Claims;
pub use jwt::TokenError;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use refresh::RefreshToken;
pub use refresh::RefreshTokenError;
pub use refresh::RefreshTokenIssuer;
pub use refresh::RefreshTokenRecord;
pub use refresh::REFRESH_TOKEN_VALIDITY_DAYS;
