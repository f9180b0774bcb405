use chrono::Duration;
use chrono::Utc;
use http::HeaderMap;
use uuid::Uuid;

use crate::credentials::CredentialError;
use crate::credentials::CredentialExtractor;
use crate::jwt::AccessToken;
use crate::jwt::AccessTokenCodec;
use crate::jwt::TokenError;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::refresh::RefreshToken;
use crate::refresh::RefreshTokenError;
use crate::refresh::RefreshTokenIssuer;
use crate::refresh::RefreshTokenRecord;

/// Well-formed Argon2id hash, with the production cost parameters, that no
/// password is expected to match.
const UNKNOWN_USER_HASH: &str = concat!(
    "$argon2id$v=19$m=65536,t=1,p=2",
    "$djWyJ/K4leo60ln20HZp8Q",
    "$9uHJLN2uks2m1MUFTDEuyAcfgd7ilFxfYcPlGdKruVM",
);

/// Authentication coordinator.
///
/// Combines password verification, access token signing, refresh token
/// generation and header parsing behind the operations a service needs:
/// login, refresh and per-request authorization.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    access_tokens: AccessTokenCodec,
    refresh_tokens: RefreshTokenIssuer,
    credentials: CredentialExtractor,
}

/// Result of successful authentication.
#[derive(Debug)]
pub struct AuthenticationResult {
    /// Signed access token
    pub access_token: AccessToken,
    /// Opaque refresh token, to be persisted by the caller
    pub refresh_token: RefreshToken,
}

/// Authentication operation errors.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    #[error("Refresh token error: {0}")]
    RefreshToken(#[from] RefreshTokenError),

    #[error("Credential error: {0}")]
    Credential(#[from] CredentialError),
}

impl AuthenticationError {
    /// Whether this is a verification failure, as opposed to a server fault.
    ///
    /// Verification failures all map to the same unauthorized response; the
    /// variant is only for diagnostics.
    pub fn is_unauthorized(&self) -> bool {
        match self {
            AuthenticationError::InvalidCredentials => true,
            AuthenticationError::Password(err) => matches!(err, PasswordError::MalformedHash(_)),
            AuthenticationError::Token(err) => !matches!(err, TokenError::EncodingFailed(_)),
            AuthenticationError::RefreshToken(err) => {
                !matches!(err, RefreshTokenError::EntropyUnavailable(_))
            }
            AuthenticationError::Credential(_) => true,
        }
    }
}

impl Authenticator {
    /// Create a new authenticator with lenient header parsing.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for access token signing
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            access_tokens: AccessTokenCodec::new(jwt_secret),
            refresh_tokens: RefreshTokenIssuer::new(),
            credentials: CredentialExtractor::lenient(),
        }
    }

    /// Replace the header parsing policy.
    pub fn with_credential_extractor(mut self, credentials: CredentialExtractor) -> Self {
        self.credentials = credentials;
        self
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `HashingFailed` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and mint a token pair.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `user_id` - Owner of the stored hash
    /// * `ttl` - Access token lifetime
    ///
    /// # Returns
    /// AuthenticationResult with access and refresh tokens
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `Password(MalformedHash)` - Stored hash unreadable
    /// * `Token(EncodingFailed)` - Token signing failed
    /// * `RefreshToken(EntropyUnavailable)` - Random source failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        user_id: Uuid,
        ttl: Duration,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.access_tokens.issue(user_id, ttl)?;
        let refresh_token = self.refresh_tokens.generate()?;

        Ok(AuthenticationResult {
            access_token,
            refresh_token,
        })
    }

    /// Run a full password check for a login whose account does not exist.
    ///
    /// Costs the same Argon2 work as [`Self::authenticate`], so a failed login
    /// takes as long for an unknown email as for a wrong password.
    pub fn reject_unknown_user(&self, password: &str) -> AuthenticationError {
        if let Err(err) = self.password_hasher.verify(password, UNKNOWN_USER_HASH) {
            return AuthenticationError::Password(err);
        }
        AuthenticationError::InvalidCredentials
    }

    /// Issue an access token without password verification.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token signing failed
    pub fn issue_access_token(
        &self,
        user_id: Uuid,
        ttl: Duration,
    ) -> Result<AccessToken, TokenError> {
        self.access_tokens.issue(user_id, ttl)
    }

    /// Validate an access token and return its subject.
    pub fn validate_token(&self, token: &str) -> Result<Uuid, TokenError> {
        self.access_tokens.verify(token)
    }

    /// Exchange a persisted refresh token record for a new access token.
    ///
    /// # Arguments
    /// * `record` - Record looked up by the caller
    /// * `ttl` - Lifetime of the new access token
    ///
    /// # Errors
    /// * `RefreshToken(Revoked | Expired)` - Record no longer usable
    /// * `Token(EncodingFailed)` - Token signing failed
    pub fn refresh(
        &self,
        record: &RefreshTokenRecord,
        ttl: Duration,
    ) -> Result<AccessToken, AuthenticationError> {
        let user_id = record.validate(Utc::now())?;
        Ok(self.access_tokens.issue(user_id, ttl)?)
    }

    /// Resolve the user behind a request's bearer token.
    ///
    /// # Errors
    /// * `Credential` - No usable `Authorization` header
    /// * `Token` - Token failed verification
    pub fn authorize(&self, headers: &HeaderMap) -> Result<Uuid, AuthenticationError> {
        let token = self.credentials.bearer_token(headers)?;
        Ok(self.access_tokens.verify(token)?)
    }

    pub fn bearer_token<'h>(&self, headers: &'h HeaderMap) -> Result<&'h str, CredentialError> {
        self.credentials.bearer_token(headers)
    }

    pub fn api_key<'h>(&self, headers: &'h HeaderMap) -> Result<&'h str, CredentialError> {
        self.credentials.api_key(headers)
    }

    /// Authorize a server-to-server call carrying `Authorization: ApiKey <key>`.
    pub fn verify_api_key(
        &self,
        headers: &HeaderMap,
        expected: &str,
    ) -> Result<(), CredentialError> {
        self.credentials.verify_api_key(headers, expected)
    }

    /// Generate a refresh token outside of a login.
    pub fn generate_refresh_token(&self) -> Result<RefreshToken, RefreshTokenError> {
        self.refresh_tokens.generate()
    }
}
