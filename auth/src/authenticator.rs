use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::verifier::CredentialError;
use crate::verifier::CredentialVerifier;

/// Authentication coordinator combining password hashing, credential issuing
/// and credential verification behind one shared secret.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    verifier: CredentialVerifier,
}

/// Result of successful authentication.
pub struct AuthenticationResult {
    /// Signed session credential
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for credential signing
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret),
            verifier: CredentialVerifier::new(jwt_secret),
        }
    }

    /// Hash a password for storage.
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify a password against the stored per-user hash and issue a credential.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash is unreadable
    /// * `JwtError` - Credential signing failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        claims: &Claims,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.jwt_handler.encode(claims)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Burn one hashing pass for a login against an unknown account.
    ///
    /// Keeps the unknown-user branch of a login roughly as slow as the
    /// wrong-password branch, so response timing does not reveal which
    /// emails are registered.
    pub fn reject_unknown_user(&self, password: &str) -> AuthenticationError {
        let _ = self.password_hasher.hash(password);
        AuthenticationError::InvalidCredentials
    }

    /// Sign claims without a password check.
    pub fn generate_token(&self, claims: &Claims) -> Result<String, JwtError> {
        self.jwt_handler.encode(claims)
    }

    /// Verify a possibly-absent credential presented by a caller.
    pub fn verify(&self, raw_token: Option<&str>) -> Result<Claims, CredentialError> {
        self.verifier.verify(raw_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    #[test]
    fn test_authenticate_success() {
        let authenticator = Authenticator::new(SECRET);
        let hash = authenticator
            .hash_password("my_password")
            .expect("Failed to hash password");

        let claims = Claims::for_user("admin@example.com", true, 24);
        let result = authenticator
            .authenticate("my_password", &hash, &claims)
            .expect("Authentication failed");

        let decoded = authenticator
            .verify(Some(&result.access_token))
            .expect("Token validation failed");
        assert_eq!(decoded.email, "admin@example.com");
        assert!(decoded.admin_user);
    }

    #[test]
    fn test_authenticate_invalid_password() {
        let authenticator = Authenticator::new(SECRET);
        let hash = authenticator.hash_password("my_password").unwrap();

        let claims = Claims::for_user("admin@example.com", true, 24);
        let result = authenticator.authenticate("wrong_password", &hash, &claims);
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_reject_unknown_user() {
        let authenticator = Authenticator::new(SECRET);

        assert!(matches!(
            authenticator.reject_unknown_user("whatever"),
            AuthenticationError::InvalidCredentials
        ));
    }

    #[test]
    fn test_verify_with_other_secret_fails() {
        let issuer = Authenticator::new(SECRET);
        let other = Authenticator::new(b"another_secret_key_at_least_32_bytes");

        let token = issuer
            .generate_token(&Claims::for_user("user@example.com", false, 1))
            .unwrap();

        assert!(matches!(
            other.verify(Some(&token)),
            Err(CredentialError::InvalidToken(_))
        ));
    }
}
