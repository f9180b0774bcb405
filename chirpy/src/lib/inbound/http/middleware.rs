use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Caller identity resolved from `Authorization: Bearer <access token>`.
///
/// Taking this as a handler argument makes the route require authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user_id = state
            .authenticator
            .authorize(&parts.headers)
            .map_err(|err| {
                if err.is_unauthorized() {
                    tracing::warn!(error = %err, "Access token rejected");
                    ApiError::unauthorized()
                } else {
                    tracing::error!(error = %err, "Access token check failed");
                    ApiError::InternalServerError("Internal server error".to_string())
                }
            })?;

        Ok(AuthenticatedUser {
            user_id: UserId(user_id),
        })
    }
}
