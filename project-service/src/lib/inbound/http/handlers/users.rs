use serde::Deserialize;
use serde::Serialize;

use super::authorize;
use super::Access;
use super::ApiError;
use super::ErrorCode;
use super::Rejection;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewPassword;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::Username;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterArguments {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub admin: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginArguments {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Register outcome. On validation failure each offending field carries its
/// own message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub status: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<ErrorCode>,
}

impl RegisterResponse {
    fn failed() -> Self {
        Self {
            message: "Error Creating User".to_string(),
            status: false,
            ..Self::default()
        }
    }
}

impl From<Rejection> for RegisterResponse {
    fn from(rejection: Rejection) -> Self {
        Self {
            message: rejection.message().to_string(),
            status: false,
            code: Some(rejection.code()),
            ..Self::default()
        }
    }
}

impl From<UserError> for RegisterResponse {
    fn from(err: UserError) -> Self {
        let mut response = Self::failed();
        match err {
            UserError::UsernameAlreadyExists(_) | UserError::InvalidUsername(_) => {
                response.username = Some(err.to_string());
                response.code = Some(ErrorCode::ValidationFailure);
            }
            UserError::EmailAlreadyExists(_) | UserError::InvalidEmail(_) => {
                response.email = Some(err.to_string());
                response.code = Some(ErrorCode::ValidationFailure);
            }
            UserError::InvalidPassword(_) => {
                response.password = Some(err.to_string());
                response.code = Some(ErrorCode::ValidationFailure);
            }
            UserError::Unauthorized => return Rejection::NotAdmin.into(),
            UserError::NotFound(_) => response.code = Some(ErrorCode::NotFound),
            UserError::InvalidCredentials => response.code = Some(ErrorCode::InvalidCredentials),
            UserError::Password(_) | UserError::TokenIssuance(_) => {
                response.code = Some(ErrorCode::InternalFailure)
            }
            UserError::DatabaseError(_) => response.code = Some(ErrorCode::StoreUnavailable),
        }
        response
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub status: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<ErrorCode>,
}

/// Profile behind the caller's credential, or the reason there is none.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserDetailsResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl UserDetailsResponse {
    fn error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub username: String,
    pub email: String,
    pub admin: bool,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.to_string(),
            email: user.email.to_string(),
            admin: user.admin,
        }
    }
}

/// Validate every field independently so the caller sees all problems at once.
fn parse_register(args: RegisterArguments) -> Result<RegisterUserCommand, RegisterResponse> {
    let username = Username::new(args.username);
    let email = EmailAddress::new(args.email);
    let password = NewPassword::new(args.password);

    match (username, email, password) {
        (Ok(username), Ok(email), Ok(password)) => Ok(RegisterUserCommand {
            username,
            email,
            password,
            admin: args.admin,
        }),
        (username, email, password) => Err(RegisterResponse {
            username: username.err().map(|e| UserError::from(e).to_string()),
            email: email.err().map(|e| UserError::from(e).to_string()),
            password: password.err().map(|e| UserError::from(e).to_string()),
            code: Some(ErrorCode::ValidationFailure),
            ..RegisterResponse::failed()
        }),
    }
}

pub async fn register(
    state: &AppState,
    credential: Option<&str>,
    args: RegisterArguments,
) -> RegisterResponse {
    let claims = match authorize(state, credential, "Register", Access::Admin) {
        Ok(claims) => claims,
        Err(rejection) => return rejection.into(),
    };

    let command = match parse_register(args) {
        Ok(command) => command,
        Err(response) => return response,
    };

    match state.identity_service.register(&claims, command).await {
        Ok(_) => RegisterResponse {
            message: "New User has been created".to_string(),
            status: true,
            ..RegisterResponse::default()
        },
        Err(e) => {
            tracing::warn!(error = %e, "Registration failed");
            e.into()
        }
    }
}

pub async fn login(state: &AppState, args: LoginArguments) -> LoginResponse {
    match state.identity_service.login(&args.email, &args.password).await {
        Ok(session) => LoginResponse {
            message: "Login successful".to_string(),
            status: true,
            token: Some(session.token),
            admin: Some(session.admin),
            code: None,
        },
        Err(e) => {
            let code = match e {
                UserError::InvalidCredentials => ErrorCode::InvalidCredentials,
                UserError::DatabaseError(_) => {
                    tracing::error!(error = %e, "Login failed");
                    ErrorCode::StoreUnavailable
                }
                _ => {
                    tracing::error!(error = %e, "Login failed");
                    ErrorCode::InternalFailure
                }
            };
            LoginResponse {
                message: "Invalid email or password".to_string(),
                status: false,
                token: None,
                admin: None,
                code: Some(code),
            }
        }
    }
}

pub async fn get_user_details(state: &AppState, credential: Option<&str>) -> UserDetailsResponse {
    let claims = match authorize(state, credential, "getUserDetails", Access::Authenticated) {
        Ok(claims) => claims,
        Err(rejection) => return UserDetailsResponse::error(rejection.message()),
    };

    match state.identity_service.current_user(&claims).await {
        Ok(details) => UserDetailsResponse {
            username: Some(details.username),
            email: Some(details.email),
            admin: Some(details.admin),
            iat: Some(details.issued_at),
            exp: Some(details.expires_at),
            error: None,
        },
        Err(e) => UserDetailsResponse::error(e.to_string()),
    }
}

pub async fn get_users(state: &AppState) -> Result<Vec<UserData>, ApiError> {
    state
        .identity_service
        .list_users()
        .await
        .map(|users| users.iter().map(UserData::from).collect())
        .map_err(|e| {
            tracing::error!(error = %e, "User query failed");
            ApiError::ServiceUnavailable(e.to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_collects_every_field_message() {
        let response = parse_register(RegisterArguments {
            username: " ".to_string(),
            password: String::new(),
            email: "not-an-email".to_string(),
            admin: false,
        })
        .unwrap_err();

        assert_eq!(response.message, "Error Creating User");
        assert!(!response.status);
        assert_eq!(
            response.username.as_deref(),
            Some("Invalid username: Username is required")
        );
        assert!(response
            .email
            .unwrap()
            .contains("Please enter a valid email address"));
        assert_eq!(
            response.password.as_deref(),
            Some("Invalid password: Password is required")
        );
    }

    #[test]
    fn test_register_reports_only_failing_fields() {
        let response = parse_register(RegisterArguments {
            username: "inspector".to_string(),
            password: "Welcome1".to_string(),
            email: "inspector@localhost".to_string(),
            admin: false,
        })
        .unwrap_err();

        assert!(response.username.is_none());
        assert!(response.password.is_none());
        assert!(response.email.is_some());
    }

    #[test]
    fn test_duplicate_email_lands_on_email_field() {
        let response =
            RegisterResponse::from(UserError::EmailAlreadyExists("a@example.com".to_string()));
        assert_eq!(
            response.email.as_deref(),
            Some("Email already exists: a@example.com")
        );
        assert_eq!(response.code, Some(ErrorCode::ValidationFailure));
    }

    #[test]
    fn test_register_accepts_free_form_usernames() {
        for username in ["Al", "John Doe", "site.lead"] {
            let command = parse_register(RegisterArguments {
                username: username.to_string(),
                password: "Welcome1".to_string(),
                email: "new.hire@example.com".to_string(),
                admin: false,
            })
            .unwrap();
            assert_eq!(command.username.as_str(), username);
        }
    }

    #[test]
    fn test_register_failures_always_carry_a_code() {
        let cases = [
            (
                UserError::Password("hashing failed".to_string()),
                ErrorCode::InternalFailure,
            ),
            (
                UserError::TokenIssuance("signing failed".to_string()),
                ErrorCode::InternalFailure,
            ),
            (
                UserError::NotFound("a@example.com".to_string()),
                ErrorCode::NotFound,
            ),
            (UserError::InvalidCredentials, ErrorCode::InvalidCredentials),
            (
                UserError::DatabaseError("pool closed".to_string()),
                ErrorCode::StoreUnavailable,
            ),
        ];

        for (err, code) in cases {
            let response = RegisterResponse::from(err);
            assert_eq!(response.message, "Error Creating User");
            assert_eq!(response.code, Some(code));
        }
    }

    #[test]
    fn test_details_error_shape() {
        let value = serde_json::to_value(UserDetailsResponse::error("No token found")).unwrap();
        assert_eq!(value, serde_json::json!({ "error": "No token found" }));
    }
}
