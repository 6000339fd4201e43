use async_trait::async_trait;

use crate::domain::user::errors::AuthError;
use crate::domain::user::models::AuthSession;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::SignUpCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::Username;

/// Port for the authentication orchestrator.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new user and issue its first token pair.
    ///
    /// The username-duplicate check runs before the email-duplicate check:
    /// when both collide, the result is `DuplicateUsername`.
    ///
    /// # Errors
    /// * `DuplicateUsername` - Username is already taken
    /// * `DuplicateEmail` - Email is already registered
    /// * `InvalidCredentials` - Post-persist consistency check failed
    /// * `DatabaseError` - Store operation failed
    async fn sign_up(&self, command: SignUpCommand) -> Result<AuthSession, AuthError>;

    /// Verify credentials and issue a token pair.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown username or wrong password, not
    ///   distinguished
    /// * `DatabaseError` - Store operation failed
    async fn login(&self, command: LoginCommand) -> Result<AuthSession, AuthError>;

    /// Exchange a still-valid refresh token for a fresh token pair.
    ///
    /// Full rotation: both tokens are newly issued. The presented refresh
    /// token is not invalidated and stays usable until it expires.
    ///
    /// # Errors
    /// * `InvalidToken` - Signature, structure, or expiry check failed
    /// * `UserNotFound` - Token subject no longer exists
    async fn refresh_access_token(&self, refresh_token: &str) -> Result<AuthSession, AuthError>;

    /// Look up the user behind an already-authenticated principal.
    ///
    /// # Errors
    /// * `UserNotFound` - User does not exist
    /// * `DatabaseError` - Store operation failed
    async fn current_user(&self, username: &Username) -> Result<User, AuthError>;
}

/// Persistence operations for the credential store.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user.
    ///
    /// Uniqueness is enforced here, atomically with the insert, so two
    /// concurrent sign-ups for the same username cannot both succeed even
    /// though they both passed the orchestrator's existence checks.
    ///
    /// # Errors
    /// * `DuplicateUsername` - Username is already taken
    /// * `DuplicateEmail` - Email is already registered
    /// * `DatabaseError` - Store operation failed
    async fn create(&self, user: User) -> Result<User, AuthError>;

    /// Retrieve a user by username (None if not found).
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, AuthError>;

    /// Whether a user with this username exists.
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn exists_by_username(&self, username: &Username) -> Result<bool, AuthError>;

    /// Whether a user with this email exists.
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn exists_by_email(&self, email: &EmailAddress) -> Result<bool, AuthError>;
}
