//! Error types for the scaffolding recipes.

use crate::engine::{SeriesError, ValidationError};
use crate::project::ProjectError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for initialization operations.
pub type InitResult<T> = Result<T, InitError>;

/// Errors raised while building or running a recipe.
#[derive(Debug, Error)]
pub enum InitError {
    /// The recipe edits `package.json` but the project has none.
    #[error("No package.json found in {0:?}. Run this command inside an npm project.")]
    MissingPackageJson(PathBuf),

    /// A required template file was not found in embedded assets.
    #[error("Template file not found: {0}")]
    TemplateNotFound(String),

    /// A step was registered with invalid arguments.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A step failed while the series was running.
    #[error(transparent)]
    Series(#[from] SeriesError),

    #[error(transparent)]
    Project(ProjectError),
}

impl From<ProjectError> for InitError {
    fn from(err: ProjectError) -> Self {
        match err {
            ProjectError::MissingPackageJson(root) => InitError::MissingPackageJson(root),
            other => InitError::Project(other),
        }
    }
}
