use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::project::errors::ProjectError;
use crate::domain::project::models::Phase;
use crate::domain::project::models::PhaseCheckList;
use crate::domain::project::models::Project;
use crate::domain::project::models::ProjectId;
use crate::domain::project::ports::ProjectRepository;

/// Stored shape of an embedded phase (JSONB column `phases`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PhaseDocument {
    phase_name: String,
    #[serde(default)]
    phase_check_lists: Vec<CheckListDocument>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CheckListDocument {
    check_list_name: String,
    is_checked: bool,
    #[serde(default)]
    comment1: String,
    #[serde(default)]
    comment2: String,
}

impl From<&Phase> for PhaseDocument {
    fn from(phase: &Phase) -> Self {
        Self {
            phase_name: phase.phase_name.clone(),
            phase_check_lists: phase
                .check_lists
                .iter()
                .map(|item| CheckListDocument {
                    check_list_name: item.check_list_name.clone(),
                    is_checked: item.is_checked,
                    comment1: item.comment1.clone(),
                    comment2: item.comment2.clone(),
                })
                .collect(),
        }
    }
}

impl From<PhaseDocument> for Phase {
    fn from(document: PhaseDocument) -> Self {
        Self {
            phase_name: document.phase_name,
            check_lists: document
                .phase_check_lists
                .into_iter()
                .map(|item| PhaseCheckList {
                    check_list_name: item.check_list_name,
                    is_checked: item.is_checked,
                    comment1: item.comment1,
                    comment2: item.comment2,
                })
                .collect(),
        }
    }
}

fn store_error(e: sqlx::Error) -> ProjectError {
    ProjectError::StoreUnavailable(e.to_string())
}

fn phase_documents(project: &Project) -> Json<Vec<PhaseDocument>> {
    Json(project.phases.iter().map(PhaseDocument::from).collect())
}

fn project_from_row(row: PgRow) -> Result<Project, ProjectError> {
    let project_id: String = row.try_get("project_id").map_err(store_error)?;
    let Json(phases): Json<Vec<PhaseDocument>> = row.try_get("phases").map_err(store_error)?;

    Ok(Project {
        project_id: ProjectId::new(project_id)?,
        project_name: row.try_get("project_name").map_err(store_error)?,
        category: row.try_get("category").map_err(store_error)?,
        project_status: row.try_get("project_status").map_err(store_error)?,
        phases: phases.into_iter().map(Phase::from).collect(),
        version: row.try_get("version").map_err(store_error)?,
    })
}

/// PostgreSQL implementation of ProjectRepository.
///
/// Scalar fields are columns; the phase hierarchy is one JSONB document that
/// is always written as a whole.
pub struct PostgresProjectRepository {
    pool: PgPool,
}

impl PostgresProjectRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn exists(&self, id: &ProjectId) -> Result<bool, ProjectError> {
        sqlx::query("SELECT 1 FROM projects WHERE project_id = $1")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map(|row| row.is_some())
            .map_err(store_error)
    }
}

#[async_trait]
impl ProjectRepository for PostgresProjectRepository {
    async fn create(&self, project: Project) -> Result<Project, ProjectError> {
        sqlx::query(
            r#"
            INSERT INTO projects
                (project_id, project_name, category, project_status, phases, version)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(project.project_id.as_str())
        .bind(&project.project_name)
        .bind(&project.category)
        .bind(&project.project_status)
        .bind(phase_documents(&project))
        .bind(project.version)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return ProjectError::DuplicateKey(project.project_id.to_string());
                }
            }
            store_error(e)
        })?;

        Ok(project)
    }

    async fn find_by_id(&self, id: &ProjectId) -> Result<Option<Project>, ProjectError> {
        sqlx::query(
            r#"
            SELECT project_id, project_name, category, project_status, phases, version
            FROM projects
            WHERE project_id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?
        .map(project_from_row)
        .transpose()
    }

    async fn find_all(&self) -> Result<Vec<Project>, ProjectError> {
        sqlx::query(
            r#"
            SELECT project_id, project_name, category, project_status, phases, version
            FROM projects
            ORDER BY created_at ASC, project_id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?
        .into_iter()
        .map(project_from_row)
        .collect()
    }

    async fn update(&self, project: Project) -> Result<Project, ProjectError> {
        let new_version: Option<i64> = sqlx::query_scalar(
            r#"
            UPDATE projects
            SET project_name = $2,
                category = $3,
                project_status = $4,
                phases = $5,
                version = version + 1
            WHERE project_id = $1 AND version = $6
            RETURNING version
            "#,
        )
        .bind(project.project_id.as_str())
        .bind(&project.project_name)
        .bind(&project.category)
        .bind(&project.project_status)
        .bind(phase_documents(&project))
        .bind(project.version)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;

        match new_version {
            Some(version) => Ok(Project { version, ..project }),
            None if self.exists(&project.project_id).await? => Err(
                ProjectError::ConcurrentModification(project.project_id.to_string()),
            ),
            None => Err(ProjectError::NotFound(project.project_id.to_string())),
        }
    }

    async fn delete(&self, id: &ProjectId) -> Result<Option<Project>, ProjectError> {
        sqlx::query(
            r#"
            DELETE FROM projects
            WHERE project_id = $1
            RETURNING project_id, project_name, category, project_status, phases, version
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?
        .map(project_from_row)
        .transpose()
    }
}
