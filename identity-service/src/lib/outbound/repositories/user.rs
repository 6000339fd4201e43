use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::user::errors::AuthError;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;

/// Credential store backed by Postgres.
///
/// Unique indexes on `username` and `email` are the last line of defense
/// against concurrent duplicate sign-ups; the insert maps their violations
/// back to the duplicate domain errors.
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn map_row(row: &PgRow) -> Result<User, AuthError> {
        let roles: Vec<String> = row
            .try_get("roles")
            .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        Ok(User {
            id: UserId(
                row.try_get("id")
                    .map_err(|e| AuthError::DatabaseError(e.to_string()))?,
            ),
            username: Username::new(
                row.try_get("username")
                    .map_err(|e| AuthError::DatabaseError(e.to_string()))?,
            )?,
            email: EmailAddress::new(
                row.try_get("email")
                    .map_err(|e| AuthError::DatabaseError(e.to_string()))?,
            )?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| AuthError::DatabaseError(e.to_string()))?,
            roles: roles.into_iter().collect(),
            created_at: row
                .try_get("created_at")
                .map_err(|e| AuthError::DatabaseError(e.to_string()))?,
        })
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: User) -> Result<User, AuthError> {
        let roles: Vec<String> = user.roles.iter().cloned().collect();

        sqlx::query(
            r#"
            INSERT INTO users (id, username, email, password_hash, roles, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(user.id.0)
        .bind(user.username.as_str())
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .bind(&roles)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    if db_err.constraint() == Some("users_username_key") {
                        return AuthError::DuplicateUsername(user.username.as_str().to_string());
                    }
                    if db_err.constraint() == Some("users_email_key") {
                        return AuthError::DuplicateEmail(user.email.as_str().to_string());
                    }
                }
            }
            AuthError::DatabaseError(e.to_string())
        })?;

        Ok(user)
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, AuthError> {
        let row = sqlx::query(
            r#"
            SELECT id, username, email, password_hash, roles, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        row.as_ref().map(Self::map_row).transpose()
    }

    async fn exists_by_username(&self, username: &Username) -> Result<bool, AuthError> {
        let row = sqlx::query(r#"SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)"#)
            .bind(username.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        row.try_get(0)
            .map_err(|e| AuthError::DatabaseError(e.to_string()))
    }

    async fn exists_by_email(&self, email: &EmailAddress) -> Result<bool, AuthError> {
        let row = sqlx::query(r#"SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)"#)
            .bind(email.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        row.try_get(0)
            .map_err(|e| AuthError::DatabaseError(e.to_string()))
    }
}
