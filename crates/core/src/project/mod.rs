//! Access to the project being provisioned.
//!
//! Every read goes to disk: probes must observe the current state, so
//! nothing here is cached between calls.

pub mod error;

pub use error::{ProjectError, ProjectResult};

use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the npm manifest.
pub const PACKAGE_JSON: &str = "package.json";

/// A JavaScript/TypeScript project rooted at a directory.
#[derive(Debug, Clone)]
pub struct Project {
    root: PathBuf,
}

impl Project {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of a project-relative path.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    pub fn exists(&self, relative: &str) -> bool {
        self.path(relative).exists()
    }

    pub fn has_package_json(&self) -> bool {
        self.exists(PACKAGE_JSON)
    }

    /// Fail with [`ProjectError::MissingPackageJson`] unless `package.json`
    /// exists.
    pub fn require_package_json(&self) -> ProjectResult<()> {
        if self.has_package_json() {
            Ok(())
        } else {
            Err(ProjectError::MissingPackageJson(self.root.clone()))
        }
    }

    /// Read and parse `package.json`, keeping its key order.
    pub fn read_package_json(&self) -> ProjectResult<Value> {
        let path = self.path(PACKAGE_JSON);
        if !path.exists() {
            return Err(ProjectError::MissingPackageJson(self.root.clone()));
        }

        let content = fs::read_to_string(&path).map_err(|source| ProjectError::FileRead {
            path: path.clone(),
            source,
        })?;

        let value: Value = serde_json::from_str(&content)
            .map_err(|source| ProjectError::PackageJsonParse { path: path.clone(), source })?;

        if !value.is_object() {
            return Err(ProjectError::PackageJsonShape(path));
        }

        Ok(value)
    }

    /// Write `package.json` with two-space indentation and a trailing
    /// newline, the layout npm itself produces.
    pub fn write_package_json(&self, value: &Value) -> ProjectResult<()> {
        let path = self.path(PACKAGE_JSON);
        let mut content = serde_json::to_string_pretty(value)
            .map_err(|source| ProjectError::PackageJsonParse { path: path.clone(), source })?;
        content.push('\n');

        fs::write(&path, content).map_err(|source| ProjectError::FileWrite { path, source })
    }

    /// Whether `devDependencies` lists `name`.
    pub fn has_dev_dependency(&self, name: &str) -> ProjectResult<bool> {
        let package = self.read_package_json()?;
        Ok(package
            .get("devDependencies")
            .and_then(|deps| deps.get(name))
            .is_some())
    }

    /// Set `scripts.<name>` to `command`, creating `scripts` if needed.
    pub fn set_script(&self, name: &str, command: &str) -> ProjectResult<()> {
        self.set_scripts(&[(name, command)])
    }

    /// Set several scripts with a single read/write of `package.json`.
    pub fn set_scripts(&self, scripts: &[(&str, &str)]) -> ProjectResult<()> {
        self.edit_package_json(|package| {
            let entry = package
                .entry("scripts")
                .or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            if let Value::Object(table) = entry {
                for (name, command) in scripts {
                    table.insert((*name).to_string(), Value::String((*command).to_string()));
                }
            }
        })
    }

    /// Set a top-level `package.json` field.
    pub fn set_field(&self, key: &str, value: Value) -> ProjectResult<()> {
        self.edit_package_json(|package| {
            package.insert(key.to_string(), value);
        })
    }

    fn edit_package_json(&self, edit: impl FnOnce(&mut Map<String, Value>)) -> ProjectResult<()> {
        let mut package = self.read_package_json()?;
        match package.as_object_mut() {
            Some(object) => edit(object),
            None => return Err(ProjectError::PackageJsonShape(self.path(PACKAGE_JSON))),
        }
        self.write_package_json(&package)
    }

    /// Write a project-relative file, creating parent directories.
    pub fn write_file(&self, relative: &str, contents: &str) -> ProjectResult<()> {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ProjectError::FileWrite {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&path, contents).map_err(|source| ProjectError::FileWrite { path, source })
    }

    /// Add the execute bits to a project-relative file.
    #[cfg(unix)]
    pub fn make_executable(&self, relative: &str) -> ProjectResult<()> {
        use std::os::unix::fs::PermissionsExt;

        let path = self.path(relative);
        let mut permissions = fs::metadata(&path)
            .map_err(|source| ProjectError::FileRead {
                path: path.clone(),
                source,
            })?
            .permissions();
        permissions.set_mode(permissions.mode() | 0o755);
        fs::set_permissions(&path, permissions).map_err(|source| ProjectError::FileWrite { path, source })
    }

    #[cfg(not(unix))]
    pub fn make_executable(&self, _relative: &str) -> ProjectResult<()> {
        Ok(())
    }

    /// Remove a project-relative file if it exists.
    pub fn remove_file(&self, relative: &str) -> ProjectResult<()> {
        let path = self.path(relative);
        if !path.exists() {
            return Ok(());
        }
        fs::remove_file(&path).map_err(|source| ProjectError::FileRemove { path, source })
    }
}
