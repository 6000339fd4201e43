//! Authentication building blocks
//!
//! Provides the two pure primitives the identity service is built on:
//! - Password hashing (Argon2id)
//! - Signed, expiring bearer tokens (HS256 JWTs)
//!
//! Both are stateless and free of I/O; the service crate composes them into
//! the sign-up/login/refresh flows.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! ```
//!
//! ## Tokens
//! ```
//! use auth::JwtCodec;
//! use chrono::Duration;
//!
//! let codec = JwtCodec::new(b"secret_key_at_least_32_bytes_long!").unwrap();
//! let token = codec.issue("alice", Duration::minutes(15)).unwrap();
//! assert_eq!(codec.verify(&token).unwrap(), "alice");
//! ```

pub mod jwt;
pub mod password;

pub use jwt::Claims;
pub use jwt::JwtCodec;
pub use jwt::JwtError;
pub use password::PasswordError;
pub use password::PasswordHasher;
