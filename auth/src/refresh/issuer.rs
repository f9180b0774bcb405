use std::fmt;

use rand::rngs::OsRng;
use rand::RngCore;

use super::errors::RefreshTokenError;

/// An opaque refresh token.
///
/// Carries no structure; its meaning lives entirely in the persisted
/// [`RefreshTokenRecord`](super::RefreshTokenRecord).
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct RefreshToken(String);

impl RefreshToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for RefreshToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RefreshToken(..)")
    }
}

/// Generates refresh tokens from the OS random source.
///
/// Stateless; validity and revocation are enforced against persisted records
/// by the caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct RefreshTokenIssuer;

impl RefreshTokenIssuer {
    /// Bytes of entropy per token.
    pub const TOKEN_BYTES: usize = 32;

    pub fn new() -> Self {
        Self
    }

    /// Generate a new refresh token.
    ///
    /// # Returns
    /// 64 lowercase hexadecimal characters encoding 256 random bits
    ///
    /// # Errors
    /// * `EntropyUnavailable` - The random source failed
    pub fn generate(&self) -> Result<RefreshToken, RefreshTokenError> {
        let mut bytes = [0u8; Self::TOKEN_BYTES];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| RefreshTokenError::EntropyUnavailable(e.to_string()))?;

        Ok(RefreshToken(hex::encode(bytes)))
    }
}
