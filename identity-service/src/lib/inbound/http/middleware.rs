use axum::extract::Request;
use axum::extract::State;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ErrorCode;
use crate::inbound::http::router::AppState;

/// Authenticated principal, resolved once per request at the transport
/// boundary and handed to handlers through request extensions.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub username: Username,
}

/// Middleware verifying the bearer access token on protected routes.
pub async fn authenticate<R: UserRepository>(
    State(state): State<AppState<R>>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_bearer_token(&req)?;

    let subject = state.codec.verify(token).map_err(|e| {
        tracing::warn!(error = %e, "Access token rejected");
        invalid_token_response("Invalid or expired token")
    })?;

    // A subject that is not a well-formed username cannot come from a
    // token this service issued
    let username =
        Username::new(subject).map_err(|_| invalid_token_response("Invalid token subject"))?;

    req.extensions_mut().insert(AuthenticatedUser { username });

    Ok(next.run(req).await)
}

fn extract_bearer_token(req: &Request) -> Result<&str, Response> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| invalid_token_response("Missing Authorization header"))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| invalid_token_response("Invalid Authorization header"))?;

    auth_str
        .strip_prefix("Bearer ")
        .ok_or_else(|| {
            invalid_token_response("Invalid Authorization header format. Expected: Bearer <token>")
        })
}

fn invalid_token_response(message: &str) -> Response {
    ApiError::new(ErrorCode::InvalidToken, message).into_response()
}
