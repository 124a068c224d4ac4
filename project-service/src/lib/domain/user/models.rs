use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::user::errors::EmailError;
use crate::user::errors::PasswordPolicyError;
use crate::user::errors::UsernameError;

/// User aggregate entity.
///
/// Created only through registration by an admin; the password hash never
/// leaves the domain and repository layers.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub email: EmailAddress,
    pub password_hash: String,
    pub admin: bool,
    pub created_at: DateTime<Utc>,
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Username value type
///
/// Any non-blank name; uniqueness is enforced by the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    /// # Errors
    /// * `Blank` - Username is empty or whitespace only
    pub fn new(username: String) -> Result<Self, UsernameError> {
        if username.trim().is_empty() {
            return Err(UsernameError::Blank);
        }
        Ok(Self(username))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Accepts `local@domain.tld` shapes: parsable by an RFC 5322 parser, no
/// whitespace, and a dot somewhere in the domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Address does not match the accepted shape
    pub fn new(email: String) -> Result<Self, EmailError> {
        if email.chars().any(char::is_whitespace) {
            return Err(EmailError::InvalidFormat(email));
        }

        let parsed = email_address::EmailAddress::from_str(&email)
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))?;

        if !parsed.domain().contains('.') {
            return Err(EmailError::InvalidFormat(email));
        }

        Ok(EmailAddress(email))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password accepted at registration; hashed by the service.
#[derive(Clone, PartialEq, Eq)]
pub struct NewPassword(String);

impl NewPassword {
    pub fn new(password: String) -> Result<Self, PasswordPolicyError> {
        if password.is_empty() {
            return Err(PasswordPolicyError::Missing);
        }
        Ok(Self(password))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for NewPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("NewPassword(***)")
    }
}

/// Command to register a new user with validated fields
#[derive(Debug)]
pub struct RegisterUserCommand {
    pub username: Username,
    pub email: EmailAddress,
    pub password: NewPassword,
    pub admin: bool,
}

/// Credential issued by a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedSession {
    pub token: String,
    pub admin: bool,
}

/// Public profile of the caller behind a verified credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDetails {
    pub username: String,
    pub email: String,
    pub admin: bool,
    pub issued_at: i64,
    pub expires_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_only_requires_a_value() {
        for name in ["Al", "John Doe", "site.lead", "survey_lead-1"] {
            assert_eq!(Username::new(name.to_string()).unwrap().as_str(), name);
        }
        assert_eq!(Username::new(String::new()), Err(UsernameError::Blank));
        assert_eq!(Username::new("   ".to_string()), Err(UsernameError::Blank));
    }

    #[test]
    fn test_email_shape() {
        assert!(EmailAddress::new("inspector@example.com".to_string()).is_ok());
        assert!(EmailAddress::new("inspector@localhost".to_string()).is_err());
        assert!(EmailAddress::new("not-an-email".to_string()).is_err());
        assert!(EmailAddress::new("in spector@example.com".to_string()).is_err());
    }

    #[test]
    fn test_password_required() {
        assert_eq!(
            NewPassword::new(String::new()),
            Err(PasswordPolicyError::Missing)
        );
        assert_eq!(
            NewPassword::new("Admin1234".to_string()).unwrap().expose(),
            "Admin1234"
        );
    }

    #[test]
    fn test_password_debug_is_redacted() {
        let password = NewPassword::new("Admin1234".to_string()).unwrap();
        assert!(!format!("{:?}", password).contains("Admin1234"));
    }
}
