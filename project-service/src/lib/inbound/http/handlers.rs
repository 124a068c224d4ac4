use auth::Claims;
use auth::CredentialError;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde::Serialize;
use serde_json::json;

use crate::domain::project::errors::ProjectError;
use crate::inbound::http::credential::Credential;
use crate::inbound::http::router::AppState;

pub mod phases;
pub mod projects;
pub mod session;
pub mod users;

/// Transport-level failure. Recovered domain outcomes never use this; they
/// are rendered as 200 responses carrying `status: false`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    BadRequest(String),
    UnprocessableEntity(String),
    ServiceUnavailable(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
        };

        (status, Json(json!({ "message": message, "status": false }))).into_response()
    }
}

/// Machine-readable failure code attached to failed mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    NoToken,
    InvalidToken,
    ExpiredToken,
    Unauthorized,
    InvalidCredentials,
    NotFound,
    IndexOutOfRange,
    DuplicateKey,
    ValidationFailure,
    ConcurrentModification,
    StoreUnavailable,
    InternalFailure,
}

impl From<&ProjectError> for ErrorCode {
    fn from(err: &ProjectError) -> Self {
        match err {
            ProjectError::Validation(_) => ErrorCode::ValidationFailure,
            ProjectError::NotFound(_) => ErrorCode::NotFound,
            ProjectError::DuplicateKey(_) => ErrorCode::DuplicateKey,
            ProjectError::PhaseIndexOutOfRange { .. }
            | ProjectError::CheckListIndexOutOfRange { .. } => ErrorCode::IndexOutOfRange,
            ProjectError::ConcurrentModification(_) => ErrorCode::ConcurrentModification,
            ProjectError::StoreUnavailable(_) => ErrorCode::StoreUnavailable,
        }
    }
}

/// What a gated operation demands of the presented credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Authenticated,
    Admin,
}

/// Why a gated operation refused to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    Credential(CredentialError),
    NotAdmin,
}

impl Rejection {
    pub fn message(&self) -> &'static str {
        match self {
            Rejection::Credential(CredentialError::NoToken) => "No token found",
            Rejection::Credential(CredentialError::InvalidToken(_)) => {
                "Unauthorized Access: Invalid token"
            }
            Rejection::Credential(CredentialError::ExpiredToken) => {
                "Unauthorized Access: Token has expired"
            }
            Rejection::NotAdmin => "Unauthorized Access",
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Rejection::Credential(CredentialError::NoToken) => ErrorCode::NoToken,
            Rejection::Credential(CredentialError::InvalidToken(_)) => ErrorCode::InvalidToken,
            Rejection::Credential(CredentialError::ExpiredToken) => ErrorCode::ExpiredToken,
            Rejection::NotAdmin => ErrorCode::Unauthorized,
        }
    }
}

/// Verify the presented credential and check it grants `access`.
pub fn authorize(
    state: &AppState,
    credential: Option<&str>,
    operation: &'static str,
    access: Access,
) -> Result<Claims, Rejection> {
    let claims = state.authenticator.verify(credential).map_err(|e| {
        tracing::warn!(operation, error = %e, "Credential rejected");
        Rejection::Credential(e)
    })?;

    if access == Access::Admin && !claims.admin_user {
        tracing::warn!(operation, requester = %claims.email, "Admin capability required");
        return Err(Rejection::NotAdmin);
    }

    Ok(claims)
}

/// Request envelope for `POST /api/operations`.
#[derive(Debug, Clone, Deserialize)]
pub struct OperationRequest {
    pub operation: String,
    #[serde(default)]
    pub arguments: serde_json::Value,
}

/// Every operation the façade exposes, with its typed arguments.
#[derive(Debug, Clone)]
pub enum Operation {
    Register(users::RegisterArguments),
    Login(users::LoginArguments),
    CreateProject(projects::CreateProjectArguments),
    UpdateProject(projects::UpdateProjectArguments),
    DeleteProject(projects::ProjectIdArguments),
    AddPhase(phases::AddPhaseArguments),
    AddCheckList(phases::AddCheckListArguments),
    UpdateCheckList(phases::UpdateCheckListArguments),
    GetUserDetails,
    GetProject(projects::ProjectIdArguments),
    GetProjects,
    GetUsers,
}

fn arguments<T: DeserializeOwned>(
    operation: &str,
    value: serde_json::Value,
) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| {
        ApiError::UnprocessableEntity(format!("Invalid arguments for {operation}: {e}"))
    })
}

impl TryFrom<OperationRequest> for Operation {
    type Error = ApiError;

    fn try_from(request: OperationRequest) -> Result<Self, Self::Error> {
        let OperationRequest {
            operation,
            arguments: value,
        } = request;

        match operation.as_str() {
            "Register" => arguments(&operation, value).map(Operation::Register),
            "Login" => arguments(&operation, value).map(Operation::Login),
            "createProject" => arguments(&operation, value).map(Operation::CreateProject),
            "updateProject" => arguments(&operation, value).map(Operation::UpdateProject),
            "deleteProject" => arguments(&operation, value).map(Operation::DeleteProject),
            "addPhase" => arguments(&operation, value).map(Operation::AddPhase),
            "addCheckList" => arguments(&operation, value).map(Operation::AddCheckList),
            "updateCheckList" => arguments(&operation, value).map(Operation::UpdateCheckList),
            "getUserDetails" => Ok(Operation::GetUserDetails),
            "getProject" => arguments(&operation, value).map(Operation::GetProject),
            "getProjects" => Ok(Operation::GetProjects),
            "getUsers" => Ok(Operation::GetUsers),
            _ => Err(ApiError::BadRequest(format!("Unknown operation: {operation}"))),
        }
    }
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Register(_) => "Register",
            Operation::Login(_) => "Login",
            Operation::CreateProject(_) => "createProject",
            Operation::UpdateProject(_) => "updateProject",
            Operation::DeleteProject(_) => "deleteProject",
            Operation::AddPhase(_) => "addPhase",
            Operation::AddCheckList(_) => "addCheckList",
            Operation::UpdateCheckList(_) => "updateCheckList",
            Operation::GetUserDetails => "getUserDetails",
            Operation::GetProject(_) => "getProject",
            Operation::GetProjects => "getProjects",
            Operation::GetUsers => "getUsers",
        }
    }
}

pub async fn execute(
    State(state): State<AppState>,
    Credential(credential): Credential,
    Json(request): Json<OperationRequest>,
) -> Result<Response, ApiError> {
    let operation = Operation::try_from(request)?;
    let credential = credential.as_deref();

    tracing::debug!(operation = operation.name(), "Executing operation");

    let response = match operation {
        Operation::Register(args) => {
            Json(users::register(&state, credential, args).await).into_response()
        }
        Operation::Login(args) => Json(users::login(&state, args).await).into_response(),
        Operation::CreateProject(args) => {
            Json(projects::create_project(&state, credential, args).await).into_response()
        }
        Operation::UpdateProject(args) => {
            Json(projects::update_project(&state, credential, args).await).into_response()
        }
        Operation::DeleteProject(args) => {
            Json(projects::delete_project(&state, credential, args).await).into_response()
        }
        Operation::AddPhase(args) => {
            Json(phases::add_phase(&state, credential, args).await).into_response()
        }
        Operation::AddCheckList(args) => {
            Json(phases::add_check_list(&state, credential, args).await).into_response()
        }
        Operation::UpdateCheckList(args) => {
            Json(phases::update_check_list(&state, credential, args).await).into_response()
        }
        Operation::GetUserDetails => {
            Json(users::get_user_details(&state, credential).await).into_response()
        }
        Operation::GetProject(args) => {
            Json(projects::get_project(&state, args).await?).into_response()
        }
        Operation::GetProjects => Json(projects::get_projects(&state).await?).into_response(),
        Operation::GetUsers => Json(users::get_users(&state).await?).into_response(),
    };

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(operation: &str, arguments: serde_json::Value) -> OperationRequest {
        OperationRequest {
            operation: operation.to_string(),
            arguments,
        }
    }

    #[test]
    fn test_parameterless_operations_ignore_missing_arguments() {
        let operation =
            Operation::try_from(request("getProjects", serde_json::Value::Null)).unwrap();
        assert_eq!(operation.name(), "getProjects");
    }

    #[test]
    fn test_unknown_operation_is_bad_request() {
        let result = Operation::try_from(request("dropDatabase", json!({})));
        assert!(matches!(result, Err(ApiError::BadRequest(_))));
    }

    #[test]
    fn test_ill_typed_arguments_are_unprocessable() {
        let result = Operation::try_from(request(
            "addCheckList",
            json!({ "projectId": "P1", "phaseIndex": "first", "checkList": {} }),
        ));
        assert!(matches!(result, Err(ApiError::UnprocessableEntity(_))));
    }

    #[test]
    fn test_error_codes_keep_not_found_and_index_apart() {
        assert_eq!(
            ErrorCode::from(&ProjectError::NotFound("P1".to_string())),
            ErrorCode::NotFound
        );
        assert_eq!(
            ErrorCode::from(&ProjectError::PhaseIndexOutOfRange { index: 4, len: 1 }),
            ErrorCode::IndexOutOfRange
        );
        assert_eq!(
            serde_json::to_value(ErrorCode::ConcurrentModification).unwrap(),
            json!("CONCURRENT_MODIFICATION")
        );
    }

    #[test]
    fn test_rejection_messages() {
        assert_eq!(
            Rejection::Credential(CredentialError::NoToken).message(),
            "No token found"
        );
        assert_eq!(
            Rejection::Credential(CredentialError::ExpiredToken).code(),
            ErrorCode::ExpiredToken
        );
        assert_eq!(Rejection::NotAdmin.message(), "Unauthorized Access");
    }
}
