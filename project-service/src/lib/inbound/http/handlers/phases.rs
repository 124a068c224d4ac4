use serde::Deserialize;

use super::authorize;
use super::projects::CheckListInput;
use super::projects::PhaseInput;
use super::projects::ProjectResponse;
use super::Access;
use crate::domain::project::models::CheckListPatch;
use crate::domain::project::models::ProjectId;
use crate::inbound::http::router::AppState;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddPhaseArguments {
    #[serde(default)]
    pub project_id: String,
    pub phase: PhaseInput,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCheckListArguments {
    #[serde(default)]
    pub project_id: String,
    pub phase_index: i64,
    pub check_list: CheckListInput,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCheckListArguments {
    #[serde(default)]
    pub project_id: String,
    pub phase_index: i64,
    pub check_list_index: i64,
    pub check_list: CheckListInput,
}

pub async fn add_phase(
    state: &AppState,
    credential: Option<&str>,
    args: AddPhaseArguments,
) -> ProjectResponse {
    if let Err(rejection) = authorize(state, credential, "addPhase", Access::Authenticated) {
        return rejection.into();
    }

    let (id, phase) = match ProjectId::new(args.project_id)
        .and_then(|id| Ok((id, args.phase.try_into_domain()?)))
    {
        Ok(parsed) => parsed,
        Err(e) => return e.into(),
    };

    match state.project_service.add_phase(&id, phase).await {
        Ok(project) => ProjectResponse::success("Phase Successfully added", &project),
        Err(e) => e.into(),
    }
}

pub async fn add_check_list(
    state: &AppState,
    credential: Option<&str>,
    args: AddCheckListArguments,
) -> ProjectResponse {
    if let Err(rejection) = authorize(state, credential, "addCheckList", Access::Authenticated) {
        return rejection.into();
    }

    let (id, item) = match ProjectId::new(args.project_id)
        .and_then(|id| Ok((id, args.check_list.try_into_domain()?)))
    {
        Ok(parsed) => parsed,
        Err(e) => return e.into(),
    };

    match state
        .project_service
        .add_check_list(&id, args.phase_index, item)
        .await
    {
        Ok(project) => {
            // The index was validated by the edit, so the phase exists.
            let phase_name = usize::try_from(args.phase_index)
                .ok()
                .and_then(|slot| project.phases.get(slot))
                .map(|phase| phase.phase_name.as_str())
                .unwrap_or_default();
            ProjectResponse::success(
                format!("Checklist Successfully added to phase: {phase_name}"),
                &project,
            )
        }
        Err(e) => e.into(),
    }
}

pub async fn update_check_list(
    state: &AppState,
    credential: Option<&str>,
    args: UpdateCheckListArguments,
) -> ProjectResponse {
    if let Err(rejection) = authorize(state, credential, "updateCheckList", Access::Authenticated) {
        return rejection.into();
    }

    let id = match ProjectId::new(args.project_id) {
        Ok(id) => id,
        Err(e) => return e.into(),
    };
    let patch = CheckListPatch {
        is_checked: args.check_list.is_checked,
        comment1: args.check_list.comment1.unwrap_or_default(),
        comment2: args.check_list.comment2.unwrap_or_default(),
    };

    match state
        .project_service
        .update_check_list(&id, args.phase_index, args.check_list_index, patch)
        .await
    {
        Ok(project) => ProjectResponse::success("Checklist Successfully updated", &project),
        Err(e) => e.into(),
    }
}
