use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::chirp::errors::ChirpBodyError;
use crate::chirp::errors::ChirpIdError;
use crate::user::models::UserId;

/// A short post authored by a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chirp {
    pub id: ChirpId,
    pub body: ChirpBody,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Chirp unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChirpId(pub Uuid);

impl ChirpId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a chirp ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, ChirpIdError> {
        Uuid::parse_str(s)
            .map(ChirpId)
            .map_err(|e| ChirpIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for ChirpId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ChirpId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Chirp body value type
///
/// Non-empty, at most 140 characters, with profane words masked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChirpBody(String);

impl ChirpBody {
    pub const MAX_LENGTH: usize = 140;
    const PROFANE_WORDS: [&'static str; 3] = ["kerfuffle", "sharbert", "fornax"];
    const MASK: &'static str = "****";

    /// Validate and clean a raw chirp body.
    ///
    /// Length is checked on the raw input. Words are whitespace-separated and
    /// rejoined with single spaces after masking.
    ///
    /// # Errors
    /// * `Empty` - Body is empty
    /// * `TooLong` - Body exceeds 140 characters
    pub fn new(body: &str) -> Result<Self, ChirpBodyError> {
        let length = body.chars().count();
        if body.trim().is_empty() {
            return Err(ChirpBodyError::Empty);
        }
        if length > Self::MAX_LENGTH {
            return Err(ChirpBodyError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        let cleaned = body
            .split_whitespace()
            .map(|word| {
                let lowered = word.to_lowercase();
                if Self::PROFANE_WORDS.contains(&lowered.as_str()) {
                    Self::MASK
                } else {
                    word
                }
            })
            .collect::<Vec<_>>()
            .join(" ");

        Ok(Self(cleaned))
    }

    /// Rebuild a body loaded from storage, already cleaned.
    pub fn from_stored(body: String) -> Self {
        Self(body)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Ordering of listed chirps by creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    /// Parse the `sort` query parameter; anything but `desc` is ascending.
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some(value) if value.eq_ignore_ascii_case("desc") => SortOrder::Descending,
            _ => SortOrder::Ascending,
        }
    }
}

/// Command to post a chirp on behalf of an authenticated user
#[derive(Debug)]
pub struct CreateChirpCommand {
    pub body: ChirpBody,
    pub user_id: UserId,
}

/// Filters for listing chirps
#[derive(Debug, Clone, Default)]
pub struct ListChirpsQuery {
    pub author_id: Option<UserId>,
    pub sort: SortOrder,
}
