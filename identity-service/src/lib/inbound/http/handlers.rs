use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::user::errors::AuthError;
use crate::domain::user::models::AuthSession;

pub mod current_user;
pub mod login;
pub mod refresh_token;
pub mod sign_up;

/// Stable machine-readable error codes surfaced to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    BadRequest,
    InvalidInputValue,
    DuplicateUsername,
    DuplicateEmail,
    InvalidToken,
    UserNotFound,
    InternalServerError,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::BadRequest => "BAD_REQUEST",
            ErrorCode::InvalidInputValue => "INVALID_INPUT_VALUE",
            ErrorCode::DuplicateUsername => "DUPLICATE_USERNAME",
            ErrorCode::DuplicateEmail => "DUPLICATE_EMAIL",
            ErrorCode::InvalidToken => "INVALID_TOKEN",
            ErrorCode::UserNotFound => "USER_NOT_FOUND",
            ErrorCode::InternalServerError => "INTERNAL_SERVER_ERROR",
        }
    }

    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::BadRequest => StatusCode::BAD_REQUEST,
            ErrorCode::InvalidInputValue => StatusCode::BAD_REQUEST,
            ErrorCode::DuplicateUsername => StatusCode::CONFLICT,
            ErrorCode::DuplicateEmail => StatusCode::CONFLICT,
            ErrorCode::InvalidToken => StatusCode::UNAUTHORIZED,
            ErrorCode::UserNotFound => StatusCode::NOT_FOUND,
            ErrorCode::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Transport-level error: a code plus a human-readable message.
///
/// Every failure leaving the service goes through this type, so all error
/// responses share the same envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    code: ErrorCode,
    message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.code.status(),
            Json(ErrorResponse::new(self.code, self.message)),
        )
            .into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::DuplicateUsername(_) => {
                ApiError::new(ErrorCode::DuplicateUsername, err.to_string())
            }
            AuthError::DuplicateEmail(_) => {
                ApiError::new(ErrorCode::DuplicateEmail, err.to_string())
            }
            AuthError::InvalidCredentials => {
                ApiError::new(ErrorCode::BadRequest, "Invalid credentials")
            }
            AuthError::InvalidToken => ApiError::new(ErrorCode::InvalidToken, err.to_string()),
            AuthError::UserNotFound(_) => ApiError::new(ErrorCode::UserNotFound, err.to_string()),
            AuthError::InvalidUsername(_)
            | AuthError::InvalidEmail(_)
            | AuthError::InvalidPassword(_) => {
                ApiError::new(ErrorCode::InvalidInputValue, err.to_string())
            }
            AuthError::DatabaseError(_) | AuthError::Unknown(_) => {
                // Full detail stays server-side; the caller gets a generic line
                tracing::error!(error = %err, "Unexpected failure");
                ApiError::new(
                    ErrorCode::InternalServerError,
                    "An unexpected error occurred",
                )
            }
        }
    }
}

/// Uniform error payload: `{errorCode, message, timestamp}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error_code: &'static str,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            error_code: code.as_str(),
            message,
            timestamp: Utc::now(),
        }
    }
}

/// Response body shared by sign-up, login, and refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSessionData {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub username: String,
    pub email: String,
    pub roles: Vec<String>,
}

impl From<&AuthSession> for AuthSessionData {
    fn from(session: &AuthSession) -> Self {
        Self {
            access_token: session.access_token.clone(),
            refresh_token: session.refresh_token.clone(),
            token_type: session.token_type().to_string(),
            username: session.user.username.as_str().to_string(),
            email: session.user.email.as_str().to_string(),
            roles: session.user.roles.iter().cloned().collect(),
        }
    }
}
