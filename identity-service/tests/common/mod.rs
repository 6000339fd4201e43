use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::JwtCodec;
use chrono::Duration;
use identity_service::domain::user::errors::AuthError;
use identity_service::domain::user::models::EmailAddress;
use identity_service::domain::user::models::User;
use identity_service::domain::user::models::Username;
use identity_service::domain::user::ports::UserRepository;
use identity_service::domain::user::service::AuthService;
use identity_service::inbound::http::router::create_router;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server on a random port.
///
/// Backed by an in-memory credential store injected through the repository
/// port, so the suite needs no database.
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub codec: JwtCodec,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let codec = Arc::new(JwtCodec::new(TEST_SECRET).expect("Failed to create codec"));
        let repository = Arc::new(InMemoryUserRepository::new());
        let auth_service = Arc::new(AuthService::new(
            repository,
            Arc::clone(&codec),
            Duration::minutes(15),
            Duration::days(7),
        ));

        let router = create_router(auth_service, codec);

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            codec: JwtCodec::new(TEST_SECRET).expect("Failed to create codec"),
        }
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Sign up a user and return the response body.
    pub async fn sign_up(&self, username: &str, email: &str, password: &str) -> serde_json::Value {
        let response = self
            .post("/api/auth/signup")
            .json(&serde_json::json!({
                "username": username,
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        response.json().await.expect("Failed to parse response")
    }
}

/// Credential store double: a vector behind a mutex, with the same
/// uniqueness guarantees the Postgres constraints provide.
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, AuthError> {
        let mut users = self.users.lock().unwrap();

        // Reject duplicates atomically with the insert, like the database
        // unique constraints do
        if users.iter().any(|u| u.username == user.username) {
            return Err(AuthError::DuplicateUsername(
                user.username.as_str().to_string(),
            ));
        }
        if users.iter().any(|u| u.email == user.email) {
            return Err(AuthError::DuplicateEmail(user.email.as_str().to_string()));
        }

        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, AuthError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| &u.username == username).cloned())
    }

    async fn exists_by_username(&self, username: &Username) -> Result<bool, AuthError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().any(|u| &u.username == username))
    }

    async fn exists_by_email(&self, email: &EmailAddress) -> Result<bool, AuthError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().any(|u| &u.email == email))
    }
}
