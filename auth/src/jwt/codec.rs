use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use uuid::Uuid;

use super::claims::Claims;
use super::claims::ISSUER;
use super::errors::TokenError;
use super::token::AccessToken;

/// Access token codec.
///
/// Signs and verifies HS256 JWTs under a single shared secret captured at
/// construction. The secret is immutable for the lifetime of the codec, so a
/// codec can be shared between request tasks without locking.
///
/// Validity of a token depends only on its signature and its `exp` claim; no
/// storage is consulted and an issued token cannot be revoked.
pub struct AccessTokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl AccessTokenCodec {
    /// Create a new codec with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Load it from configuration once at startup, never log it
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked by hand: jsonwebtoken accepts exp == now.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation.set_issuer(&[ISSUER]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Issue a token for a user, valid for `ttl` from now.
    ///
    /// The codec does not enforce a maximum or a positive ttl; callers apply
    /// their own lifetime policy before calling this.
    ///
    /// # Arguments
    /// * `user_id` - Subject of the token
    /// * `ttl` - Token lifetime
    ///
    /// # Returns
    /// Signed token in compact form (`header.claims.signature`)
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed, or `ttl` reaches past the
    ///   representable date range
    pub fn issue(&self, user_id: Uuid, ttl: Duration) -> Result<AccessToken, TokenError> {
        self.issue_at(user_id, Utc::now(), ttl)
    }

    fn issue_at(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<AccessToken, TokenError> {
        let claims = Claims::for_user(user_id, now, ttl)?;

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map(AccessToken::new)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Verify a token and recover the user it was issued for.
    ///
    /// The signature is checked before the expiry, so a token signed with
    /// another secret reports `InvalidSignature` even when it has expired.
    ///
    /// # Arguments
    /// * `token` - Compact JWT string
    ///
    /// # Returns
    /// User identifier from the `sub` claim
    ///
    /// # Errors
    /// * `InvalidSignature` - Wrong secret or tampered token
    /// * `Expired` - `exp` is not in the future
    /// * `Malformed` - Unparseable token, missing claims, foreign issuer or non-UUID subject
    pub fn verify(&self, token: &str) -> Result<Uuid, TokenError> {
        let claims = self.decode_claims(token)?;

        if claims.is_expired(Utc::now().timestamp()) {
            return Err(TokenError::Expired);
        }

        Uuid::parse_str(&claims.sub)
            .map_err(|e| TokenError::Malformed(format!("Invalid subject: {}", e)))
    }

    /// Check signature and issuer, then return the claims without judging expiry.
    ///
    /// # Errors
    /// * `InvalidSignature` - Wrong secret or tampered token
    /// * `Malformed` - Unparseable token, missing claims or foreign issuer
    pub fn decode_claims(&self, token: &str) -> Result<Claims, TokenError> {
        Ok(decode::<Claims>(token, &self.decoding_key, &self.validation)?.claims)
    }
}
