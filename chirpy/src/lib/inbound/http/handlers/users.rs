use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::UpdateUserCommand;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;
use crate::user::ports::UserServicePort;

/// HTTP request body carrying a user's credentials (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserCredentialsRequest {
    email: String,
    password: String,
}

impl UserCredentialsRequest {
    fn try_into_create_command(self) -> Result<CreateUserCommand, UserError> {
        let email = EmailAddress::new(self.email)?;
        Ok(CreateUserCommand::new(email, self.password))
    }

    fn try_into_update_command(self) -> Result<UpdateUserCommand, UserError> {
        let email = EmailAddress::new(self.email)?;
        Ok(UpdateUserCommand {
            email,
            password: self.password,
        })
    }
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<UserCredentialsRequest>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    state
        .user_service
        .create_user(body.try_into_create_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::CREATED, user.into()))
}

pub async fn update_user(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(body): Json<UserCredentialsRequest>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    state
        .user_service
        .update_user(&user.user_id, body.try_into_update_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}
