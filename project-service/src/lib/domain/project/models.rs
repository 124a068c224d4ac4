use std::fmt;

use super::errors::FieldError;

fn required(field: &'static str, value: String) -> Result<String, FieldError> {
    if value.trim().is_empty() {
        Err(FieldError::Blank(field))
    } else {
        Ok(value)
    }
}

/// Caller-assigned project key. The sole lookup key for every mutation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectId(String);

impl ProjectId {
    pub fn new(id: String) -> Result<Self, FieldError> {
        required("projectId", id).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Project aggregate: a whole document owning its phases and their checklists.
///
/// `version` counts persisted writes; the store only accepts a write carrying
/// the version it last handed out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub project_id: ProjectId,
    pub project_name: String,
    pub category: String,
    pub project_status: String,
    pub phases: Vec<Phase>,
    pub version: i64,
}

/// Named stage of a project. Identified only by its position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phase {
    pub phase_name: String,
    pub check_lists: Vec<PhaseCheckList>,
}

impl Phase {
    pub fn new(phase_name: String, check_lists: Vec<PhaseCheckList>) -> Result<Self, FieldError> {
        Ok(Self {
            phase_name: required("phaseName", phase_name)?,
            check_lists,
        })
    }
}

/// Single inspection item. `check_list_name` is fixed once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseCheckList {
    pub check_list_name: String,
    pub is_checked: bool,
    pub comment1: String,
    pub comment2: String,
}

impl PhaseCheckList {
    pub fn new(
        check_list_name: String,
        is_checked: bool,
        comment1: Option<String>,
        comment2: Option<String>,
    ) -> Result<Self, FieldError> {
        Ok(Self {
            check_list_name: required("checkListName", check_list_name)?,
            is_checked,
            comment1: comment1.unwrap_or_default(),
            comment2: comment2.unwrap_or_default(),
        })
    }
}

/// The mutable subset of a checklist item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckListPatch {
    pub is_checked: bool,
    pub comment1: String,
    pub comment2: String,
}

/// Command to create a project with validated fields
#[derive(Debug, Clone)]
pub struct CreateProjectCommand {
    pub project_id: ProjectId,
    pub project_name: String,
    pub category: String,
    pub project_status: String,
    pub phases: Vec<Phase>,
}

impl CreateProjectCommand {
    /// # Errors
    /// * `Blank` - Any of the four scalar fields is missing or blank
    pub fn new(
        project_id: String,
        project_name: String,
        category: String,
        project_status: String,
        phases: Vec<Phase>,
    ) -> Result<Self, FieldError> {
        Ok(Self {
            project_id: ProjectId::new(project_id)?,
            project_name: required("projectName", project_name)?,
            category: required("category", category)?,
            project_status: required("projectStatus", project_status)?,
            phases,
        })
    }

    pub fn into_project(self) -> Project {
        Project {
            project_id: self.project_id,
            project_name: self.project_name,
            category: self.category,
            project_status: self.project_status,
            phases: self.phases,
            version: 0,
        }
    }
}

/// Partial update of the scalar project fields.
///
/// Blank values are dropped at construction so they keep the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateProjectCommand {
    pub project_name: Option<String>,
    pub category: Option<String>,
    pub project_status: Option<String>,
}

impl UpdateProjectCommand {
    pub fn new(
        project_name: Option<String>,
        category: Option<String>,
        project_status: Option<String>,
    ) -> Self {
        let non_blank = |value: Option<String>| value.filter(|v| !v.trim().is_empty());
        Self {
            project_name: non_blank(project_name),
            category: non_blank(category),
            project_status: non_blank(project_status),
        }
    }

    pub fn apply_to(self, project: &mut Project) {
        if let Some(project_name) = self.project_name {
            project.project_name = project_name;
        }
        if let Some(category) = self.category {
            project.category = category;
        }
        if let Some(project_status) = self.project_status {
            project.project_status = project_status;
        }
    }
}
