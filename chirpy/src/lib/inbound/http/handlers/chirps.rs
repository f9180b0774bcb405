use axum::extract::Path;
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::ChirpData;
use crate::chirp::errors::ChirpError;
use crate::chirp::models::ChirpBody;
use crate::chirp::models::ChirpId;
use crate::chirp::models::CreateChirpCommand;
use crate::chirp::models::ListChirpsQuery;
use crate::chirp::models::SortOrder;
use crate::chirp::ports::ChirpServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;
use crate::user::models::UserId;

/// HTTP request body for posting a chirp (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateChirpRequest {
    body: String,
}

/// Query string of the chirp listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListChirpsParams {
    author_id: Option<String>,
    sort: Option<String>,
}

impl ListChirpsParams {
    fn try_into_query(self) -> Result<ListChirpsQuery, UserError> {
        let author_id = self
            .author_id
            .as_deref()
            .map(UserId::from_string)
            .transpose()?;

        Ok(ListChirpsQuery {
            author_id,
            sort: SortOrder::from_param(self.sort.as_deref()),
        })
    }
}

pub async fn create_chirp(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(body): Json<CreateChirpRequest>,
) -> Result<ApiSuccess<ChirpData>, ApiError> {
    let body = ChirpBody::new(&body.body).map_err(ChirpError::from)?;

    state
        .chirp_service
        .create_chirp(CreateChirpCommand {
            body,
            user_id: user.user_id,
        })
        .await
        .map_err(ApiError::from)
        .map(|ref chirp| ApiSuccess::new(StatusCode::CREATED, chirp.into()))
}

pub async fn list_chirps(
    State(state): State<AppState>,
    Query(params): Query<ListChirpsParams>,
) -> Result<ApiSuccess<Vec<ChirpData>>, ApiError> {
    let query = params
        .try_into_query()
        .map_err(|err| ApiError::BadRequest(err.to_string()))?;

    state
        .chirp_service
        .list_chirps(query)
        .await
        .map_err(ApiError::from)
        .map(|chirps| {
            ApiSuccess::new(StatusCode::OK, chirps.iter().map(ChirpData::from).collect())
        })
}

pub async fn get_chirp(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<ChirpData>, ApiError> {
    let chirp_id = ChirpId::from_string(&id).map_err(ChirpError::from)?;

    state
        .chirp_service
        .get_chirp(&chirp_id)
        .await
        .map_err(ApiError::from)
        .map(|ref chirp| ApiSuccess::new(StatusCode::OK, chirp.into()))
}

pub async fn delete_chirp(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let chirp_id = ChirpId::from_string(&id).map_err(ChirpError::from)?;

    state
        .chirp_service
        .delete_chirp(&user.user_id, &chirp_id)
        .await
        .map_err(ApiError::from)
        .map(|_| StatusCode::NO_CONTENT)
}
