use thiserror::Error;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;

/// Why a presented credential was rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CredentialError {
    #[error("No token found")]
    NoToken,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token has expired")]
    ExpiredToken,
}

impl From<JwtError> for CredentialError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::TokenExpired => CredentialError::ExpiredToken,
            other => CredentialError::InvalidToken(other.to_string()),
        }
    }
}

/// Classifies a raw bearer credential into session claims or a rejection.
///
/// Pure with respect to its inputs: the token, the server secret and the
/// current time.
pub struct CredentialVerifier {
    jwt_handler: JwtHandler,
}

impl CredentialVerifier {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            jwt_handler: JwtHandler::new(secret),
        }
    }

    /// Verify a possibly-absent credential.
    ///
    /// A blank string is treated the same as an absent one.
    ///
    /// # Errors
    /// * `NoToken` - No credential was presented
    /// * `InvalidToken` - Bad signature, malformed token or missing claims
    /// * `ExpiredToken` - Well-formed credential past its `exp`
    pub fn verify(&self, raw_token: Option<&str>) -> Result<Claims, CredentialError> {
        let token = raw_token
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(CredentialError::NoToken)?;

        Ok(self.jwt_handler.decode::<Claims>(token)?)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    fn token_for(claims: &Claims) -> String {
        JwtHandler::new(SECRET).encode(claims).unwrap()
    }

    #[test]
    fn test_absent_and_blank_tokens() {
        let verifier = CredentialVerifier::new(SECRET);

        assert_eq!(verifier.verify(None), Err(CredentialError::NoToken));
        assert_eq!(verifier.verify(Some("   ")), Err(CredentialError::NoToken));
    }

    #[test]
    fn test_valid_token() {
        let verifier = CredentialVerifier::new(SECRET);
        let claims = Claims::for_user("admin@example.com", true, 2);

        let decoded = verifier.verify(Some(&token_for(&claims))).unwrap();
        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_garbage_token() {
        let verifier = CredentialVerifier::new(SECRET);

        let result = verifier.verify(Some("not-a-jwt"));
        assert!(matches!(result, Err(CredentialError::InvalidToken(_))));
    }

    #[test]
    fn test_expired_token() {
        let verifier = CredentialVerifier::new(SECRET);
        let now = Utc::now().timestamp();
        let claims =
            Claims::for_user("user@example.com", false, 1).with_window(now - 600, now - 60);

        assert_eq!(
            verifier.verify(Some(&token_for(&claims))),
            Err(CredentialError::ExpiredToken)
        );
    }

    #[test]
    fn test_expired_token_signed_with_other_secret_is_invalid() {
        let verifier = CredentialVerifier::new(SECRET);
        let now = Utc::now().timestamp();
        let claims =
            Claims::for_user("user@example.com", false, 1).with_window(now - 600, now - 60);
        let token = JwtHandler::new(b"another_secret_key_at_least_32_bytes")
            .encode(&claims)
            .unwrap();

        assert!(matches!(
            verifier.verify(Some(&token)),
            Err(CredentialError::InvalidToken(_))
        ));
    }
}
