use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::Claims;
use chrono::Utc;

use crate::domain::user::models::IssuedSession;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserDetails;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::IdentityServicePort;
use crate::user::ports::UserRepository;

/// Domain service implementation for identity and role operations.
pub struct IdentityService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
    expiration_hours: i64,
}

impl<UR> IdentityService<UR>
where
    UR: UserRepository,
{
    /// Create a new identity service.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Shared hasher/issuer/verifier
    /// * `expiration_hours` - Lifetime of issued credentials
    pub fn new(
        repository: Arc<UR>,
        authenticator: Arc<Authenticator>,
        expiration_hours: i64,
    ) -> Self {
        Self {
            repository,
            authenticator,
            expiration_hours,
        }
    }
}

fn authentication_error(err: AuthenticationError) -> UserError {
    match err {
        AuthenticationError::InvalidCredentials => UserError::InvalidCredentials,
        AuthenticationError::PasswordError(e) => UserError::Password(e.to_string()),
        AuthenticationError::JwtError(e) => UserError::TokenIssuance(e.to_string()),
    }
}

#[async_trait]
impl<UR> IdentityServicePort for IdentityService<UR>
where
    UR: UserRepository,
{
    async fn register(
        &self,
        requester: &Claims,
        command: RegisterUserCommand,
    ) -> Result<User, UserError> {
        if !requester.admin_user {
            tracing::warn!(requester = %requester.email, "Non-admin attempted to register a user");
            return Err(UserError::Unauthorized);
        }

        if self
            .repository
            .find_by_username(&command.username)
            .await?
            .is_some()
        {
            return Err(UserError::UsernameAlreadyExists(command.username.to_string()));
        }
        if self
            .repository
            .find_by_email(command.email.as_str())
            .await?
            .is_some()
        {
            return Err(UserError::EmailAlreadyExists(command.email.to_string()));
        }

        let password_hash = self
            .authenticator
            .hash_password(command.password.expose())
            .map_err(|e| UserError::Password(e.to_string()))?;

        let user = User {
            id: UserId::new(),
            username: command.username,
            email: command.email,
            password_hash,
            admin: command.admin,
            created_at: Utc::now(),
        };

        let created = self.repository.create(user).await?;
        tracing::info!(
            username = %created.username,
            admin = created.admin,
            registered_by = %requester.email,
            "User registered"
        );

        Ok(created)
    }

    async fn login(&self, email: &str, password: &str) -> Result<IssuedSession, UserError> {
        let Some(user) = self.repository.find_by_email(email).await? else {
            let rejection = self.authenticator.reject_unknown_user(password);
            return Err(authentication_error(rejection));
        };

        let claims = Claims::for_user(user.email.as_str(), user.admin, self.expiration_hours);

        let result = self
            .authenticator
            .authenticate(password, &user.password_hash, &claims)
            .map_err(authentication_error)?;

        tracing::debug!(user_id = %user.id, "Session issued");

        Ok(IssuedSession {
            token: result.access_token,
            admin: user.admin,
        })
    }

    async fn current_user(&self, claims: &Claims) -> Result<UserDetails, UserError> {
        let user = self
            .repository
            .find_by_email(&claims.email)
            .await?
            .ok_or_else(|| UserError::NotFound(claims.email.clone()))?;

        Ok(UserDetails {
            username: user.username.to_string(),
            email: user.email.to_string(),
            admin: user.admin,
            issued_at: claims.iat,
            expires_at: claims.exp,
        })
    }

    async fn list_users(&self) -> Result<Vec<User>, UserError> {
        self.repository.list_all().await
    }
}
