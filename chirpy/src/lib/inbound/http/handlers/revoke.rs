use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;

use super::ApiError;
use crate::inbound::http::router::AppState;
use crate::session::ports::SessionServicePort;

pub async fn revoke(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let refresh_token = state.authenticator.bearer_token(&headers).map_err(|err| {
        tracing::warn!(error = %err, "Revoke rejected");
        ApiError::unauthorized()
    })?;

    state
        .session_service
        .revoke(refresh_token)
        .await
        .map_err(ApiError::from)
        .map(|_| StatusCode::NO_CONTENT)
}
