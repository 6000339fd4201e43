use axum::extract::State;
use axum::Extension;
use axum::Json;
use serde::Serialize;

use super::ApiError;
use crate::domain::user::models::User;
use crate::domain::user::ports::AuthServicePort;
use crate::domain::user::ports::UserRepository;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// The principal arrives as an extension: it was resolved once by the auth
/// middleware at the transport boundary, never pulled from ambient state.
pub async fn current_user<R: UserRepository>(
    State(state): State<AppState<R>>,
    Extension(principal): Extension<AuthenticatedUser>,
) -> Result<Json<CurrentUserData>, ApiError> {
    let user = state.auth_service.current_user(&principal.username).await?;

    Ok(Json(CurrentUserData::from(&user)))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentUserData {
    pub id: String,
    pub username: String,
    pub email: String,
    pub roles: Vec<String>,
}

impl From<&User> for CurrentUserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.as_str().to_string(),
            email: user.email.as_str().to_string(),
            roles: user.roles.iter().cloned().collect(),
        }
    }
}
