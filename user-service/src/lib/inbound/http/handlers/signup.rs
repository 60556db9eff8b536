use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::InsertedUser;
use crate::domain::user::models::NewUserCommand;
use crate::domain::user::models::Password;
use crate::domain::user::models::PersonName;
use crate::domain::user::models::PhoneNumber;
use crate::domain::user::models::Role;
use crate::inbound::http::router::AppState;
use crate::user::errors::EmailError;
use crate::user::errors::NameError;
use crate::user::errors::PasswordPolicyError;
use crate::user::errors::PhoneError;
use crate::user::errors::RoleError;

pub async fn signup(
    State(state): State<AppState>,
    body: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<ApiSuccess<SignupResponseData>, ApiError> {
    let Json(body) = body?;

    state
        .user_service
        .signup(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref inserted| ApiSuccess::new(StatusCode::OK, inserted.into()))
}

/// HTTP request body for registering a user (raw JSON)
#[derive(Debug, Clone, Deserialize)]
pub struct SignupRequest {
    email: String,
    password: String,
    first_name: String,
    last_name: String,
    #[serde(alias = "phone_number")]
    phone: String,
    #[serde(alias = "user_type")]
    role: String,
}

#[derive(Debug, Clone, Error)]
enum ParseSignupRequestError {
    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Invalid password: {0}")]
    Password(#[from] PasswordPolicyError),

    #[error("Invalid name: {0}")]
    Name(#[from] NameError),

    #[error("Invalid phone number: {0}")]
    Phone(#[from] PhoneError),

    #[error("Invalid role: {0}")]
    Role(#[from] RoleError),
}

impl SignupRequest {
    fn try_into_command(self) -> Result<NewUserCommand, ParseSignupRequestError> {
        Ok(NewUserCommand {
            email: EmailAddress::new(self.email)?,
            password: Password::new(self.password).validated()?,
            first_name: PersonName::new(self.first_name)?,
            last_name: PersonName::new(self.last_name)?,
            phone: PhoneNumber::new(self.phone)?,
            role: self.role.parse::<Role>()?,
        })
    }
}

impl From<ParseSignupRequestError> for ApiError {
    fn from(err: ParseSignupRequestError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignupResponseData {
    pub inserted_id: String,
}

impl From<&InsertedUser> for SignupResponseData {
    fn from(inserted: &InsertedUser) -> Self {
        Self {
            inserted_id: inserted.inserted_id.to_string(),
        }
    }
}
