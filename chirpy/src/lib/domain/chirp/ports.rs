use async_trait::async_trait;

use crate::chirp::errors::ChirpError;
use crate::chirp::models::Chirp;
use crate::chirp::models::ChirpId;
use crate::chirp::models::CreateChirpCommand;
use crate::chirp::models::ListChirpsQuery;
use crate::user::models::UserId;

/// Port for chirp domain service operations.
#[async_trait]
pub trait ChirpServicePort: Send + Sync + 'static {
    /// Post a new chirp.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_chirp(&self, command: CreateChirpCommand) -> Result<Chirp, ChirpError>;

    /// Retrieve a chirp by identifier.
    ///
    /// # Errors
    /// * `NotFound` - Chirp does not exist
    async fn get_chirp(&self, id: &ChirpId) -> Result<Chirp, ChirpError>;

    /// List chirps, optionally by one author, ordered by creation time.
    async fn list_chirps(&self, query: ListChirpsQuery) -> Result<Vec<Chirp>, ChirpError>;

    /// Delete a chirp owned by `requester`.
    ///
    /// # Errors
    /// * `NotFound` - Chirp does not exist
    /// * `Forbidden` - Chirp belongs to another user
    async fn delete_chirp(&self, requester: &UserId, id: &ChirpId) -> Result<(), ChirpError>;
}

/// Persistence operations for chirps.
#[async_trait]
pub trait ChirpRepository: Send + Sync + 'static {
    async fn create(&self, chirp: Chirp) -> Result<Chirp, ChirpError>;

    async fn find_by_id(&self, id: &ChirpId) -> Result<Option<Chirp>, ChirpError>;

    /// Retrieve chirps in ascending creation order.
    async fn list(&self, author_id: Option<UserId>) -> Result<Vec<Chirp>, ChirpError>;

    /// # Errors
    /// * `NotFound` - Chirp does not exist
    async fn delete(&self, id: &ChirpId) -> Result<(), ChirpError>;
}
