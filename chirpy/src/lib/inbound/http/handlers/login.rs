use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use super::INVALID_LOGIN_MESSAGE;
use crate::inbound::http::router::AppState;
use crate::session::models::LoginCommand;
use crate::session::ports::SessionServicePort;

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequestBody>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let command = LoginCommand {
        email: body.email,
        password: body.password,
        expires_in_seconds: body.expires_in_seconds,
    };

    let session = state.session_service.login(command).await.map_err(|err| {
        if err.is_unauthorized() {
            ApiError::Unauthorized(INVALID_LOGIN_MESSAGE.to_string())
        } else {
            ApiError::from(err)
        }
    })?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        LoginResponseData {
            user: (&session.user).into(),
            token: session.access_token.into_inner(),
            refresh_token: session.refresh_token.into_inner(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    email: String,
    password: String,
    #[serde(default)]
    expires_in_seconds: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    #[serde(flatten)]
    pub user: UserData,
    pub token: String,
    pub refresh_token: String,
}
