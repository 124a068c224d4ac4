use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::project::errors::ProjectError;
use crate::domain::project::models::Project;
use crate::domain::project::models::ProjectId;
use crate::domain::project::ports::ProjectRepository;
use crate::domain::user::models::User;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

/// Process-local project store. Keeps insertion order.
#[derive(Default)]
pub struct InMemoryProjectRepository {
    projects: RwLock<Vec<Project>>,
}

impl InMemoryProjectRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn create(&self, project: Project) -> Result<Project, ProjectError> {
        let mut projects = self.projects.write().await;
        if projects.iter().any(|p| p.project_id == project.project_id) {
            return Err(ProjectError::DuplicateKey(project.project_id.to_string()));
        }
        projects.push(project.clone());
        Ok(project)
    }

    async fn find_by_id(&self, id: &ProjectId) -> Result<Option<Project>, ProjectError> {
        let projects = self.projects.read().await;
        Ok(projects.iter().find(|p| &p.project_id == id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Project>, ProjectError> {
        Ok(self.projects.read().await.clone())
    }

    async fn update(&self, project: Project) -> Result<Project, ProjectError> {
        let mut projects = self.projects.write().await;
        let stored = projects
            .iter_mut()
            .find(|p| p.project_id == project.project_id)
            .ok_or_else(|| ProjectError::NotFound(project.project_id.to_string()))?;

        if stored.version != project.version {
            return Err(ProjectError::ConcurrentModification(
                project.project_id.to_string(),
            ));
        }

        *stored = Project {
            version: project.version + 1,
            ..project
        };
        Ok(stored.clone())
    }

    async fn delete(&self, id: &ProjectId) -> Result<Option<Project>, ProjectError> {
        let mut projects = self.projects.write().await;
        let slot = projects.iter().position(|p| &p.project_id == id);
        Ok(slot.map(|slot| projects.remove(slot)))
    }
}

/// Process-local user store. Keeps insertion order.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.username == user.username) {
            return Err(UserError::UsernameAlreadyExists(user.username.to_string()));
        }
        if users.iter().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email.as_str() == email).cloned())
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| &u.username == username).cloned())
    }

    async fn list_all(&self) -> Result<Vec<User>, UserError> {
        Ok(self.users.read().await.clone())
    }
}
