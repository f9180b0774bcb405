use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use serde::Deserialize;

use super::ApiError;
use crate::inbound::http::router::AppState;
use crate::user::models::UserId;
use crate::user::ports::UserServicePort;

const USER_UPGRADED_EVENT: &str = "user.upgraded";

/// Payment provider notification (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PolkaWebhookRequest {
    event: String,
    data: PolkaWebhookData,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PolkaWebhookData {
    user_id: String,
}

/// Handle a payment provider event authenticated with `Authorization: ApiKey <key>`.
///
/// The key is checked before the body is parsed. Only `user.upgraded` has an
/// effect; other events are acknowledged.
pub async fn polka_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    state
        .authenticator
        .verify_api_key(&headers, &state.polka_api_key)
        .map_err(|err| {
            tracing::warn!(error = %err, "Webhook rejected");
            ApiError::unauthorized()
        })?;

    let body: PolkaWebhookRequest = serde_json::from_slice(&body).map_err(|err| {
        tracing::warn!(error = %err, "Webhook payload rejected");
        ApiError::UnprocessableEntity(format!("Invalid webhook payload: {}", err))
    })?;

    if body.event != USER_UPGRADED_EVENT {
        tracing::debug!(event = %body.event, "Ignoring webhook event");
        return Ok(StatusCode::NO_CONTENT);
    }

    let user_id = UserId::from_string(&body.data.user_id)
        .map_err(|err| ApiError::BadRequest(err.to_string()))?;

    state
        .user_service
        .upgrade_to_chirpy_red(&user_id)
        .await
        .map_err(ApiError::from)
        .map(|_| StatusCode::NO_CONTENT)
}
