use std::sync::Arc;

use async_trait::async_trait;

use super::errors::ProjectError;
use super::models::CheckListPatch;
use super::models::CreateProjectCommand;
use super::models::Phase;
use super::models::PhaseCheckList;
use super::models::Project;
use super::models::ProjectId;
use super::models::UpdateProjectCommand;
use super::mutation;
use super::ports::ProjectRepository;
use super::ports::ProjectServicePort;

/// Concrete implementation of ProjectServicePort.
///
/// Every edit is read, mutate in memory, persist whole document. The persist
/// is version-checked, so of two edits racing on one project the second to
/// write fails with `ConcurrentModification` instead of erasing the first.
/// Nothing is retried here: appends are not idempotent.
pub struct ProjectService<PR>
where
    PR: ProjectRepository,
{
    repository: Arc<PR>,
}

impl<PR> ProjectService<PR>
where
    PR: ProjectRepository,
{
    pub fn new(repository: Arc<PR>) -> Self {
        Self { repository }
    }

    async fn edit<F>(
        &self,
        id: &ProjectId,
        operation: &'static str,
        apply: F,
    ) -> Result<Project, ProjectError>
    where
        F: FnOnce(&mut Project) -> Result<(), ProjectError> + Send,
    {
        let mut project = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| ProjectError::NotFound(id.to_string()))?;

        apply(&mut project)?;

        let saved = self.repository.update(project).await.map_err(|e| {
            if matches!(e, ProjectError::ConcurrentModification(_)) {
                tracing::warn!(project_id = %id, operation, "Lost the race to persist project");
            }
            e
        })?;

        tracing::info!(
            project_id = %id,
            operation,
            version = saved.version,
            "Project persisted"
        );

        Ok(saved)
    }
}

#[async_trait]
impl<PR> ProjectServicePort for ProjectService<PR>
where
    PR: ProjectRepository,
{
    async fn create_project(&self, command: CreateProjectCommand) -> Result<Project, ProjectError> {
        let created = self.repository.create(command.into_project()).await?;
        tracing::info!(project_id = %created.project_id, "Project created");
        Ok(created)
    }

    async fn update_project(
        &self,
        id: &ProjectId,
        command: UpdateProjectCommand,
    ) -> Result<Project, ProjectError> {
        self.edit(id, "updateProject", |project| {
            command.apply_to(project);
            Ok(())
        })
        .await
    }

    async fn delete_project(&self, id: &ProjectId) -> Result<Project, ProjectError> {
        let deleted = self
            .repository
            .delete(id)
            .await?
            .ok_or_else(|| ProjectError::NotFound(id.to_string()))?;
        tracing::info!(project_id = %id, "Project deleted");
        Ok(deleted)
    }

    async fn get_project(&self, id: &ProjectId) -> Result<Option<Project>, ProjectError> {
        self.repository.find_by_id(id).await
    }

    async fn list_projects(&self) -> Result<Vec<Project>, ProjectError> {
        self.repository.find_all().await
    }

    async fn add_phase(&self, id: &ProjectId, phase: Phase) -> Result<Project, ProjectError> {
        self.edit(id, "addPhase", |project| {
            mutation::append_phase(project, phase);
            Ok(())
        })
        .await
    }

    async fn add_check_list(
        &self,
        id: &ProjectId,
        phase_index: i64,
        item: PhaseCheckList,
    ) -> Result<Project, ProjectError> {
        self.edit(id, "addCheckList", |project| {
            mutation::append_check_list(project, phase_index, item).map(|_| ())
        })
        .await
    }

    async fn update_check_list(
        &self,
        id: &ProjectId,
        phase_index: i64,
        check_list_index: i64,
        patch: CheckListPatch,
    ) -> Result<Project, ProjectError> {
        self.edit(id, "updateCheckList", |project| {
            mutation::update_check_list(project, phase_index, check_list_index, patch).map(|_| ())
        })
        .await
    }
}
