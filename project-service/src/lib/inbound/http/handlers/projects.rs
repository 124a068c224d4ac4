use serde::Deserialize;
use serde::Serialize;

use super::authorize;
use super::Access;
use super::ApiError;
use super::ErrorCode;
use super::Rejection;
use crate::domain::project::errors::FieldError;
use crate::domain::project::errors::ProjectError;
use crate::domain::project::models::CreateProjectCommand;
use crate::domain::project::models::Phase;
use crate::domain::project::models::PhaseCheckList;
use crate::domain::project::models::Project;
use crate::domain::project::models::ProjectId;
use crate::domain::project::models::UpdateProjectCommand;
use crate::inbound::http::router::AppState;

/// Uniform result of every project mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectResponse {
    pub message: String,
    pub status: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<ProjectData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<ErrorCode>,
}

impl ProjectResponse {
    pub fn success(message: impl Into<String>, project: &Project) -> Self {
        Self {
            message: message.into(),
            status: true,
            project: Some(project.into()),
            code: None,
        }
    }
}

impl From<Rejection> for ProjectResponse {
    fn from(rejection: Rejection) -> Self {
        Self {
            message: rejection.message().to_string(),
            status: false,
            project: None,
            code: Some(rejection.code()),
        }
    }
}

impl From<ProjectError> for ProjectResponse {
    fn from(err: ProjectError) -> Self {
        Self {
            code: Some(ErrorCode::from(&err)),
            message: err.to_string(),
            status: false,
            project: None,
        }
    }
}

impl From<FieldError> for ProjectResponse {
    fn from(err: FieldError) -> Self {
        ProjectError::from(err).into()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectData {
    pub project_id: String,
    pub project_name: String,
    pub category: String,
    pub project_status: String,
    pub phases: Vec<PhaseData>,
    pub version: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseData {
    pub phase_name: String,
    pub phase_check_lists: Vec<CheckListData>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckListData {
    pub check_list_name: String,
    pub is_checked: bool,
    pub comment1: String,
    pub comment2: String,
}

impl From<&Project> for ProjectData {
    fn from(project: &Project) -> Self {
        Self {
            project_id: project.project_id.to_string(),
            project_name: project.project_name.clone(),
            category: project.category.clone(),
            project_status: project.project_status.clone(),
            phases: project
                .phases
                .iter()
                .map(|phase| PhaseData {
                    phase_name: phase.phase_name.clone(),
                    phase_check_lists: phase
                        .check_lists
                        .iter()
                        .map(|item| CheckListData {
                            check_list_name: item.check_list_name.clone(),
                            is_checked: item.is_checked,
                            comment1: item.comment1.clone(),
                            comment2: item.comment2.clone(),
                        })
                        .collect(),
                })
                .collect(),
            version: project.version,
        }
    }
}

/// Phase as supplied by a caller.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseInput {
    #[serde(default)]
    pub phase_name: String,
    #[serde(default)]
    pub phase_check_lists: Vec<CheckListInput>,
}

impl PhaseInput {
    pub fn try_into_domain(self) -> Result<Phase, FieldError> {
        let check_lists = self
            .phase_check_lists
            .into_iter()
            .map(CheckListInput::try_into_domain)
            .collect::<Result<Vec<_>, _>>()?;
        Phase::new(self.phase_name, check_lists)
    }
}

/// Checklist item as supplied by a caller.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckListInput {
    #[serde(default)]
    pub check_list_name: String,
    pub is_checked: bool,
    pub comment1: Option<String>,
    pub comment2: Option<String>,
}

impl CheckListInput {
    pub fn try_into_domain(self) -> Result<PhaseCheckList, FieldError> {
        PhaseCheckList::new(
            self.check_list_name,
            self.is_checked,
            self.comment1,
            self.comment2,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectArguments {
    #[serde(default)]
    pub project_id: String,
    #[serde(default)]
    pub project_name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub project_status: String,
    #[serde(default)]
    pub phases: Vec<PhaseInput>,
}

impl CreateProjectArguments {
    fn try_into_command(self) -> Result<CreateProjectCommand, FieldError> {
        let phases = self
            .phases
            .into_iter()
            .map(PhaseInput::try_into_domain)
            .collect::<Result<Vec<_>, _>>()?;
        CreateProjectCommand::new(
            self.project_id,
            self.project_name,
            self.category,
            self.project_status,
            phases,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectArguments {
    #[serde(default)]
    pub project_id: String,
    pub project_name: Option<String>,
    pub category: Option<String>,
    pub project_status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectIdArguments {
    #[serde(default)]
    pub project_id: String,
}

pub async fn create_project(
    state: &AppState,
    credential: Option<&str>,
    args: CreateProjectArguments,
) -> ProjectResponse {
    if let Err(rejection) = authorize(state, credential, "createProject", Access::Authenticated) {
        return rejection.into();
    }

    let command = match args.try_into_command() {
        Ok(command) => command,
        Err(e) => return e.into(),
    };

    match state.project_service.create_project(command).await {
        Ok(project) => ProjectResponse::success("Project created successfully", &project),
        Err(e) => {
            tracing::warn!(error = %e, "Project creation failed");
            e.into()
        }
    }
}

pub async fn update_project(
    state: &AppState,
    credential: Option<&str>,
    args: UpdateProjectArguments,
) -> ProjectResponse {
    if let Err(rejection) = authorize(state, credential, "updateProject", Access::Authenticated) {
        return rejection.into();
    }

    let id = match ProjectId::new(args.project_id) {
        Ok(id) => id,
        Err(e) => return e.into(),
    };
    let command = UpdateProjectCommand::new(args.project_name, args.category, args.project_status);

    match state.project_service.update_project(&id, command).await {
        Ok(project) => ProjectResponse::success("Project updated successfully", &project),
        Err(e) => e.into(),
    }
}

pub async fn delete_project(
    state: &AppState,
    credential: Option<&str>,
    args: ProjectIdArguments,
) -> ProjectResponse {
    if let Err(rejection) = authorize(state, credential, "deleteProject", Access::Authenticated) {
        return rejection.into();
    }

    let id = match ProjectId::new(args.project_id) {
        Ok(id) => id,
        Err(e) => return e.into(),
    };

    match state.project_service.delete_project(&id).await {
        Ok(project) => ProjectResponse::success("Project deleted successfully", &project),
        Err(e) => e.into(),
    }
}

pub async fn get_project(
    state: &AppState,
    args: ProjectIdArguments,
) -> Result<Option<ProjectData>, ApiError> {
    let Ok(id) = ProjectId::new(args.project_id) else {
        return Ok(None);
    };

    state
        .project_service
        .get_project(&id)
        .await
        .map(|project| project.as_ref().map(ProjectData::from))
        .map_err(unavailable)
}

pub async fn get_projects(state: &AppState) -> Result<Vec<ProjectData>, ApiError> {
    state
        .project_service
        .list_projects()
        .await
        .map(|projects| projects.iter().map(ProjectData::from).collect())
        .map_err(unavailable)
}

fn unavailable(err: ProjectError) -> ApiError {
    tracing::error!(error = %err, "Project query failed");
    ApiError::ServiceUnavailable(err.to_string())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_project_data_wire_names() {
        let project = CreateProjectArguments {
            project_id: "P1".to_string(),
            project_name: "Bridge".to_string(),
            category: "civil".to_string(),
            project_status: "open".to_string(),
            phases: vec![PhaseInput {
                phase_name: "Survey".to_string(),
                phase_check_lists: vec![],
            }],
        }
        .try_into_command()
        .unwrap()
        .into_project();

        let value = serde_json::to_value(ProjectData::from(&project)).unwrap();
        assert_eq!(value["projectId"], "P1");
        assert_eq!(value["projectStatus"], "open");
        assert_eq!(value["phases"][0]["phaseName"], "Survey");
        assert_eq!(value["phases"][0]["phaseCheckLists"], json!([]));
    }

    #[test]
    fn test_blank_nested_name_fails_validation() {
        let args: CreateProjectArguments = serde_json::from_value(json!({
            "projectId": "P1",
            "projectName": "Bridge",
            "category": "civil",
            "projectStatus": "open",
            "phases": [{ "phaseName": "Survey", "phaseCheckLists": [{ "isChecked": false }] }]
        }))
        .unwrap();

        assert_eq!(
            args.try_into_command().unwrap_err(),
            FieldError::Blank("checkListName")
        );
    }

    #[test]
    fn test_failure_response_omits_project() {
        let response = ProjectResponse::from(ProjectError::NotFound("P9".to_string()));
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["message"], "Project not found: P9");
        assert_eq!(value["status"], false);
        assert_eq!(value["code"], "NOT_FOUND");
        assert!(value.get("project").is_none());
    }
}
