use std::sync::Arc;

use async_trait::async_trait;
use auth::JwtCodec;
use chrono::Duration;

use crate::domain::user::errors::AuthError;
use crate::domain::user::models::AuthSession;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::SignUpCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::Username;
use crate::domain::user::ports::AuthServicePort;
use crate::domain::user::ports::UserRepository;

/// Authentication orchestrator.
///
/// Coordinates the credential store, the password hasher, and the token
/// codec. Holds no per-request state: every call is independent and the
/// only shared data (the signing secret inside the codec) is immutable.
pub struct AuthService<R>
where
    R: UserRepository,
{
    repository: Arc<R>,
    codec: Arc<JwtCodec>,
    password_hasher: auth::PasswordHasher,
    access_token_ttl: Duration,
    refresh_token_ttl: Duration,
}

impl<R> AuthService<R>
where
    R: UserRepository,
{
    pub fn new(
        repository: Arc<R>,
        codec: Arc<JwtCodec>,
        access_token_ttl: Duration,
        refresh_token_ttl: Duration,
    ) -> Self {
        Self {
            repository,
            codec,
            password_hasher: auth::PasswordHasher::new(),
            access_token_ttl,
            refresh_token_ttl,
        }
    }

    /// Single credential-verification path shared by login and by the
    /// post-sign-up consistency check. Absent user and hash mismatch are
    /// indistinguishable by design.
    async fn verify_credentials(
        &self,
        username: &Username,
        password: &str,
    ) -> Result<User, AuthError> {
        let user = self
            .repository
            .find_by_username(username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let matches = self
            .password_hasher
            .verify(password, &user.password_hash)
            .map_err(|e| AuthError::Unknown(format!("Password verification failed: {}", e)))?;

        if !matches {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(user)
    }

    /// Mint a fresh access + refresh pair keyed on the user's username.
    fn issue_session(&self, user: User) -> Result<AuthSession, AuthError> {
        let access_token = self
            .codec
            .issue(user.username.as_str(), self.access_token_ttl)
            .map_err(|e| AuthError::Unknown(format!("Token generation failed: {}", e)))?;

        let refresh_token = self
            .codec
            .issue(user.username.as_str(), self.refresh_token_ttl)
            .map_err(|e| AuthError::Unknown(format!("Token generation failed: {}", e)))?;

        Ok(AuthSession {
            access_token,
            refresh_token,
            user,
        })
    }
}

#[async_trait]
impl<R> AuthServicePort for AuthService<R>
where
    R: UserRepository,
{
    async fn sign_up(&self, command: SignUpCommand) -> Result<AuthSession, AuthError> {
        // Username check first: it wins when both username and email collide
        if self.repository.exists_by_username(&command.username).await? {
            return Err(AuthError::DuplicateUsername(command.username.to_string()));
        }

        if self.repository.exists_by_email(&command.email).await? {
            return Err(AuthError::DuplicateEmail(command.email.to_string()));
        }

        let password_hash = self
            .password_hasher
            .hash(command.password.as_str())
            .map_err(|e| AuthError::Unknown(format!("Password hashing failed: {}", e)))?;

        let user = User::new(command.username, command.email, password_hash);
        let created_user = self.repository.create(user).await?;

        tracing::info!(username = %created_user.username, "User registered");

        // Re-authenticate through the login path: tokens are only issued
        // for a persisted user whose stored hash matches the submitted
        // password.
        let verified_user = self
            .verify_credentials(&created_user.username, command.password.as_str())
            .await?;

        self.issue_session(verified_user)
    }

    async fn login(&self, command: LoginCommand) -> Result<AuthSession, AuthError> {
        // A username that fails validation cannot belong to any stored user
        let username =
            Username::new(command.username).map_err(|_| AuthError::InvalidCredentials)?;

        let user = self
            .verify_credentials(&username, &command.password)
            .await?;

        tracing::info!(username = %user.username, "User logged in");

        self.issue_session(user)
    }

    async fn refresh_access_token(&self, refresh_token: &str) -> Result<AuthSession, AuthError> {
        let subject = self
            .codec
            .verify(refresh_token)
            .map_err(|_| AuthError::InvalidToken)?;

        let username = Username::new(subject).map_err(|_| AuthError::InvalidToken)?;

        // Unlike login, refresh does reveal a missing user: the caller
        // already held a valid token for it.
        let user = self
            .repository
            .find_by_username(&username)
            .await?
            .ok_or_else(|| AuthError::UserNotFound(username.to_string()))?;

        tracing::debug!(username = %user.username, "Refresh token rotated");

        self.issue_session(user)
    }

    async fn current_user(&self, username: &Username) -> Result<User, AuthError> {
        self.repository
            .find_by_username(username)
            .await?
            .ok_or_else(|| AuthError::UserNotFound(username.to_string()))
    }
}
