//! Error types for project file access.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for project operations.
pub type ProjectResult<T> = Result<T, ProjectError>;

/// Errors that can occur while reading or editing project files.
#[derive(Debug, Error)]
pub enum ProjectError {
    /// The project has no `package.json`.
    #[error("package.json file not found in {0:?}")]
    MissingPackageJson(PathBuf),

    /// `package.json` is not valid JSON.
    #[error("Failed to parse {path:?}: {source}")]
    PackageJsonParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// `package.json` parsed but its top level is not an object.
    #[error("{0:?} must contain a JSON object")]
    PackageJsonShape(PathBuf),

    /// Failed to read a file.
    #[error("Failed to read file {path:?}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write a file.
    #[error("Failed to write file {path:?}: {source}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to remove a file.
    #[error("Failed to remove file {path:?}: {source}")]
    FileRemove {
        path: PathBuf,
        source: std::io::Error,
    },
}
