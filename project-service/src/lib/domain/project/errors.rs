use thiserror::Error;

/// A required text field was missing or blank.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("{0} is required")]
    Blank(&'static str),
}

/// Top-level error type for all project-related operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProjectError {
    #[error("Validation failed: {0}")]
    Validation(#[from] FieldError),

    #[error("Project not found: {0}")]
    NotFound(String),

    #[error("Project already exists: {0}")]
    DuplicateKey(String),

    #[error("Phase index {index} is out of range (project has {len} phases)")]
    PhaseIndexOutOfRange { index: i64, len: usize },

    #[error(
        "Checklist index {index} is out of range (phase {phase_index} has {len} checklist items)"
    )]
    CheckListIndexOutOfRange {
        phase_index: usize,
        index: i64,
        len: usize,
    },

    #[error("Project {0} was modified concurrently; reload it and reapply the change")]
    ConcurrentModification(String),

    // Infrastructure errors
    #[error("Project store unavailable: {0}")]
    StoreUnavailable(String),
}
