use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::AuthSessionData;
use crate::domain::user::ports::AuthServicePort;
use crate::domain::user::ports::UserRepository;
use crate::inbound::http::router::AppState;

pub async fn refresh_token<R: UserRepository>(
    State(state): State<AppState<R>>,
    Json(body): Json<RefreshTokenRequest>,
) -> Result<Json<AuthSessionData>, ApiError> {
    let session = state
        .auth_service
        .refresh_access_token(&body.refresh_token)
        .await?;

    Ok(Json(AuthSessionData::from(&session)))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    refresh_token: String,
}
