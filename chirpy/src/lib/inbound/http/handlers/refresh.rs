use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::session::ports::SessionServicePort;

/// Exchange the refresh token in the `Authorization` header for an access token.
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<ApiSuccess<RefreshResponseData>, ApiError> {
    let refresh_token = state.authenticator.bearer_token(&headers).map_err(|err| {
        tracing::warn!(error = %err, "Refresh rejected");
        ApiError::unauthorized()
    })?;

    state
        .session_service
        .refresh(refresh_token)
        .await
        .map_err(ApiError::from)
        .map(|token| {
            ApiSuccess::new(
                StatusCode::OK,
                RefreshResponseData {
                    token: token.into_inner(),
                },
            )
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefreshResponseData {
    pub token: String,
}
