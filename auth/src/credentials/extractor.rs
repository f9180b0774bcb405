use http::header::AUTHORIZATION;
use http::HeaderMap;
use subtle::ConstantTimeEq;

use super::errors::CredentialError;

pub const BEARER_SCHEME: &str = "Bearer";
pub const API_KEY_SCHEME: &str = "ApiKey";

/// Pulls credentials out of the `Authorization` header.
///
/// The header value is split on whitespace and the second field is the
/// credential. By default the first field (the scheme) is not inspected, so
/// `Token abc` yields `abc` just like `Bearer abc`. [`CredentialExtractor::strict`]
/// requires the expected scheme keyword instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CredentialExtractor {
    enforce_scheme: bool,
}

impl CredentialExtractor {
    /// Extractor accepting any scheme keyword.
    pub fn lenient() -> Self {
        Self {
            enforce_scheme: false,
        }
    }

    /// Extractor rejecting credentials whose scheme keyword does not match
    /// (compared case-insensitively).
    pub fn strict() -> Self {
        Self {
            enforce_scheme: true,
        }
    }

    /// Extract a user bearer token (`Authorization: Bearer <token>`).
    ///
    /// # Errors
    /// * `MissingCredential` - Header absent, not valid UTF-8, or fewer than two fields
    /// * `UnexpectedScheme` - Strict mode and the scheme is not `Bearer`
    pub fn bearer_token<'h>(&self, headers: &'h HeaderMap) -> Result<&'h str, CredentialError> {
        self.credential(headers, BEARER_SCHEME)
    }

    /// Extract a server-to-server API key (`Authorization: ApiKey <key>`).
    ///
    /// # Errors
    /// * `MissingCredential` - Header absent, not valid UTF-8, or fewer than two fields
    /// * `UnexpectedScheme` - Strict mode and the scheme is not `ApiKey`
    pub fn api_key<'h>(&self, headers: &'h HeaderMap) -> Result<&'h str, CredentialError> {
        self.credential(headers, API_KEY_SCHEME).map(|key| key.trim())
    }

    /// Check the API key in the header against the expected one.
    ///
    /// The comparison runs in constant time for keys of equal length.
    ///
    /// # Errors
    /// * `MissingCredential` / `UnexpectedScheme` - As for [`Self::api_key`]
    /// * `ApiKeyMismatch` - Key present but different
    pub fn verify_api_key(
        &self,
        headers: &HeaderMap,
        expected: &str,
    ) -> Result<(), CredentialError> {
        let provided = self.api_key(headers)?;

        if provided.len() != expected.len() {
            return Err(CredentialError::ApiKeyMismatch);
        }
        if bool::from(provided.as_bytes().ct_eq(expected.as_bytes())) {
            Ok(())
        } else {
            Err(CredentialError::ApiKeyMismatch)
        }
    }

    fn credential<'h>(
        &self,
        headers: &'h HeaderMap,
        scheme: &'static str,
    ) -> Result<&'h str, CredentialError> {
        let value = headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(CredentialError::MissingCredential)?;

        let mut fields = value.split_whitespace();
        let (Some(found_scheme), Some(credential)) = (fields.next(), fields.next()) else {
            return Err(CredentialError::MissingCredential);
        };

        if self.enforce_scheme && !found_scheme.eq_ignore_ascii_case(scheme) {
            return Err(CredentialError::UnexpectedScheme { expected: scheme });
        }

        Ok(credential)
    }
}

/// Extract a bearer token, accepting any scheme keyword.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, CredentialError> {
    CredentialExtractor::lenient().bearer_token(headers)
}

/// Extract an API key, accepting any scheme keyword.
pub fn api_key(headers: &HeaderMap) -> Result<&str, CredentialError> {
    CredentialExtractor::lenient().api_key(headers)
}
