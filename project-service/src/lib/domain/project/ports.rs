use async_trait::async_trait;

use super::errors::ProjectError;
use super::models::CheckListPatch;
use super::models::CreateProjectCommand;
use super::models::Phase;
use super::models::PhaseCheckList;
use super::models::Project;
use super::models::ProjectId;
use super::models::UpdateProjectCommand;

/// Port for project domain service operations.
///
/// Authorization is decided by the caller before any of these run.
#[async_trait]
pub trait ProjectServicePort: Send + Sync + 'static {
    /// Create a new project.
    ///
    /// # Errors
    /// * `DuplicateKey` - A project with this id already exists
    /// * `StoreUnavailable` - Store operation failed
    async fn create_project(&self, command: CreateProjectCommand) -> Result<Project, ProjectError>;

    /// Replace the supplied scalar fields of a project.
    ///
    /// # Errors
    /// * `NotFound` - No project with this id
    /// * `ConcurrentModification` - Project changed between read and write
    /// * `StoreUnavailable` - Store operation failed
    async fn update_project(
        &self,
        id: &ProjectId,
        command: UpdateProjectCommand,
    ) -> Result<Project, ProjectError>;

    /// Remove a project and return the removed document.
    ///
    /// # Errors
    /// * `NotFound` - No project with this id
    /// * `StoreUnavailable` - Store operation failed
    async fn delete_project(&self, id: &ProjectId) -> Result<Project, ProjectError>;

    /// Retrieve a project (None if absent).
    async fn get_project(&self, id: &ProjectId) -> Result<Option<Project>, ProjectError>;

    /// Retrieve all projects in creation order.
    async fn list_projects(&self) -> Result<Vec<Project>, ProjectError>;

    /// Append a phase and return the updated project.
    ///
    /// # Errors
    /// * `NotFound` - No project with this id
    /// * `ConcurrentModification` - Project changed between read and write
    async fn add_phase(&self, id: &ProjectId, phase: Phase) -> Result<Project, ProjectError>;

    /// Append a checklist item to one phase and return the updated project.
    ///
    /// # Errors
    /// * `NotFound` - No project with this id
    /// * `PhaseIndexOutOfRange` - `phase_index` does not address a phase
    /// * `ConcurrentModification` - Project changed between read and write
    async fn add_check_list(
        &self,
        id: &ProjectId,
        phase_index: i64,
        item: PhaseCheckList,
    ) -> Result<Project, ProjectError>;

    /// Overwrite the mutable fields of one checklist item and return the updated project.
    ///
    /// # Errors
    /// * `NotFound` - No project with this id
    /// * `PhaseIndexOutOfRange` / `CheckListIndexOutOfRange` - Index does not address an entry
    /// * `ConcurrentModification` - Project changed between read and write
    async fn update_check_list(
        &self,
        id: &ProjectId,
        phase_index: i64,
        check_list_index: i64,
        patch: CheckListPatch,
    ) -> Result<Project, ProjectError>;
}

/// Document store for projects, keyed by the caller-assigned project id.
#[async_trait]
pub trait ProjectRepository: Send + Sync + 'static {
    /// Insert a new project document.
    ///
    /// # Errors
    /// * `DuplicateKey` - Project id already present
    /// * `StoreUnavailable` - Store operation failed
    async fn create(&self, project: Project) -> Result<Project, ProjectError>;

    /// Retrieve a project by id (None if not found).
    async fn find_by_id(&self, id: &ProjectId) -> Result<Option<Project>, ProjectError>;

    /// Retrieve all projects, oldest first.
    async fn find_all(&self) -> Result<Vec<Project>, ProjectError>;

    /// Persist the whole document if the stored version still equals
    /// `project.version`. Returns the document with its new version.
    ///
    /// # Errors
    /// * `NotFound` - Project no longer exists
    /// * `ConcurrentModification` - Stored version moved on since the read
    /// * `StoreUnavailable` - Store operation failed
    async fn update(&self, project: Project) -> Result<Project, ProjectError>;

    /// Remove a project, returning the removed document (None if not found).
    async fn delete(&self, id: &ProjectId) -> Result<Option<Project>, ProjectError>;
}
