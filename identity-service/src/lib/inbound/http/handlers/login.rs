use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::AuthSessionData;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::ports::AuthServicePort;
use crate::domain::user::ports::UserRepository;
use crate::inbound::http::router::AppState;

pub async fn login<R: UserRepository>(
    State(state): State<AppState<R>>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<AuthSessionData>, ApiError> {
    let session = state
        .auth_service
        .login(LoginCommand {
            username: body.username,
            password: body.password,
        })
        .await?;

    Ok(Json(AuthSessionData::from(&session)))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    username: String,
    password: String,
}
