use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::chirp::errors::ChirpError;
use crate::chirp::models::Chirp;
use crate::chirp::models::ChirpId;
use crate::chirp::models::CreateChirpCommand;
use crate::chirp::models::ListChirpsQuery;
use crate::chirp::models::SortOrder;
use crate::chirp::ports::ChirpRepository;
use crate::chirp::ports::ChirpServicePort;
use crate::user::models::UserId;

/// Domain service implementation for chirp operations.
pub struct ChirpService<CR>
where
    CR: ChirpRepository,
{
    repository: Arc<CR>,
}

impl<CR> ChirpService<CR>
where
    CR: ChirpRepository,
{
    pub fn new(repository: Arc<CR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<CR> ChirpServicePort for ChirpService<CR>
where
    CR: ChirpRepository,
{
    async fn create_chirp(&self, command: CreateChirpCommand) -> Result<Chirp, ChirpError> {
        let now = Utc::now();
        let chirp = Chirp {
            id: ChirpId::new(),
            body: command.body,
            user_id: command.user_id,
            created_at: now,
            updated_at: now,
        };

        let created = self.repository.create(chirp).await?;
        tracing::info!(chirp_id = %created.id, user_id = %created.user_id, "Chirp created");

        Ok(created)
    }

    async fn get_chirp(&self, id: &ChirpId) -> Result<Chirp, ChirpError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ChirpError::NotFound(id.to_string()))
    }

    async fn list_chirps(&self, query: ListChirpsQuery) -> Result<Vec<Chirp>, ChirpError> {
        let mut chirps = self.repository.list(query.author_id).await?;

        match query.sort {
            SortOrder::Ascending => chirps.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
            SortOrder::Descending => chirps.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        }

        Ok(chirps)
    }

    async fn delete_chirp(&self, requester: &UserId, id: &ChirpId) -> Result<(), ChirpError> {
        let chirp = self.get_chirp(id).await?;

        if chirp.user_id != *requester {
            tracing::warn!(
                chirp_id = %id,
                user_id = %requester,
                "Refused to delete chirp of another user"
            );
            return Err(ChirpError::Forbidden(id.to_string()));
        }

        self.repository.delete(id).await?;
        tracing::info!(chirp_id = %id, user_id = %requester, "Chirp deleted");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use mockall::mock;

    use super::*;
    use crate::chirp::models::ChirpBody;

    mock! {
        pub TestChirpRepository {}

        #[async_trait]
        impl ChirpRepository for TestChirpRepository {
            async fn create(&self, chirp: Chirp) -> Result<Chirp, ChirpError>;
            async fn find_by_id(&self, id: &ChirpId) -> Result<Option<Chirp>, ChirpError>;
            async fn list(&self, author_id: Option<UserId>) -> Result<Vec<Chirp>, ChirpError>;
            async fn delete(&self, id: &ChirpId) -> Result<(), ChirpError>;
        }
    }

    fn chirp(user_id: UserId, body: &str, age_minutes: i64) -> Chirp {
        let created_at = Utc::now() - Duration::minutes(age_minutes);
        Chirp {
            id: ChirpId::new(),
            body: ChirpBody::new(body).unwrap(),
            user_id,
            created_at,
            updated_at: created_at,
        }
    }

    #[tokio::test]
    async fn test_create_chirp() {
        let mut repository = MockTestChirpRepository::new();
        let user_id = UserId::new();

        repository
            .expect_create()
            .withf(move |chirp| chirp.user_id == user_id && chirp.body.as_str() == "hello ****")
            .times(1)
            .returning(|chirp| Ok(chirp));

        let service = ChirpService::new(Arc::new(repository));

        let created = service
            .create_chirp(CreateChirpCommand {
                body: ChirpBody::new("hello Sharbert").unwrap(),
                user_id,
            })
            .await
            .expect("Create failed");

        assert_eq!(created.user_id, user_id);
    }

    #[tokio::test]
    async fn test_list_chirps_sorted_descending() {
        let mut repository = MockTestChirpRepository::new();
        let user_id = UserId::new();

        let stored = vec![
            chirp(user_id, "oldest", 30),
            chirp(user_id, "middle", 20),
            chirp(user_id, "newest", 10),
        ];
        repository
            .expect_list()
            .withf(move |author| *author == Some(user_id))
            .times(1)
            .returning(move |_| Ok(stored.clone()));

        let service = ChirpService::new(Arc::new(repository));

        let chirps = service
            .list_chirps(ListChirpsQuery {
                author_id: Some(user_id),
                sort: SortOrder::Descending,
            })
            .await
            .unwrap();

        let bodies: Vec<&str> = chirps.iter().map(|c| c.body.as_str()).collect();
        assert_eq!(bodies, vec!["newest", "middle", "oldest"]);
    }

    #[tokio::test]
    async fn test_get_chirp_not_found() {
        let mut repository = MockTestChirpRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = ChirpService::new(Arc::new(repository));

        let result = service.get_chirp(&ChirpId::new()).await;
        assert!(matches!(result, Err(ChirpError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_chirp_of_another_user() {
        let mut repository = MockTestChirpRepository::new();
        let owner = UserId::new();
        let stored = chirp(owner, "mine", 1);
        let chirp_id = stored.id;

        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));
        repository.expect_delete().times(0);

        let service = ChirpService::new(Arc::new(repository));

        let result = service.delete_chirp(&UserId::new(), &chirp_id).await;
        assert!(matches!(result, Err(ChirpError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_delete_own_chirp() {
        let mut repository = MockTestChirpRepository::new();
        let owner = UserId::new();
        let stored = chirp(owner, "mine", 1);
        let chirp_id = stored.id;

        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));
        repository
            .expect_delete()
            .withf(move |id| *id == chirp_id)
            .times(1)
            .returning(|_| Ok(()));

        let service = ChirpService::new(Arc::new(repository));

        assert!(service.delete_chirp(&owner, &chirp_id).await.is_ok());
    }
}
