//! Authentication library for the project tracker.
//!
//! Provides:
//! - Password hashing (Argon2id)
//! - Session credential issuing and decoding (HS256 JWT)
//! - Credential verification with `NoToken` / `InvalidToken` / `ExpiredToken`
//!   classification
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
//! ## Login and Verification
//! ```
//! use auth::{Authenticator, Claims, CredentialError};
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!");
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify against the stored hash and issue a credential
//! let claims = Claims::for_user("alice@example.com", false, 24);
//! let result = auth.authenticate("password123", &hash, &claims).unwrap();
//!
//! // Later calls: verify the presented credential
//! let decoded = auth.verify(Some(&result.access_token)).unwrap();
//! assert_eq!(decoded.email, "alice@example.com");
//! assert_eq!(auth.verify(None), Err(CredentialError::NoToken));
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;
pub mod verifier;

pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use verifier::CredentialError;
pub use verifier::CredentialVerifier;
