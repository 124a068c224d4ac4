use async_trait::async_trait;
use auth::Claims;

use crate::domain::user::models::IssuedSession;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserDetails;
use crate::domain::user::models::Username;
use crate::user::errors::UserError;

/// Port for identity and role operations.
#[async_trait]
pub trait IdentityServicePort: Send + Sync + 'static {
    /// Register a new user on behalf of an authenticated admin.
    ///
    /// # Arguments
    /// * `requester` - Verified claims of the caller
    /// * `command` - Validated registration fields
    ///
    /// # Errors
    /// * `Unauthorized` - Requester does not carry the admin capability
    /// * `UsernameAlreadyExists` / `EmailAlreadyExists` - Unique field collision
    /// * `Password` - Hashing failed
    /// * `DatabaseError` - Database operation failed
    async fn register(
        &self,
        requester: &Claims,
        command: RegisterUserCommand,
    ) -> Result<User, UserError>;

    /// Check an email/password pair and issue a session credential.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password (indistinguishable)
    /// * `TokenIssuance` - Credential signing failed
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, email: &str, password: &str) -> Result<IssuedSession, UserError>;

    /// Load the profile behind verified claims.
    ///
    /// # Errors
    /// * `NotFound` - No user with the claimed email
    /// * `DatabaseError` - Database operation failed
    async fn current_user(&self, claims: &Claims) -> Result<UserDetails, UserError>;

    /// List all users.
    async fn list_users(&self) -> Result<Vec<User>, UserError>;
}

/// Persistence operations for user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Retrieve user by email address (None if not found).
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;

    /// Retrieve user by username (None if not found).
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;

    /// Retrieve all users, oldest first.
    async fn list_all(&self) -> Result<Vec<User>, UserError>;
}
