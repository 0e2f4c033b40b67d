//! Handles shared by every recipe step.

use super::error::InitResult;
use super::templates::Template;
use crate::config::AppConfig;
use crate::engine::step::{action, probe, Action, Probe};
use crate::project::{Project, ProjectResult};
use crate::shell::Shell;
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

/// The project a recipe provisions and the shell it runs commands in.
#[derive(Clone)]
pub struct InitContext {
    project: Arc<Project>,
    shell: Shell,
    prefix: Option<String>,
}

impl InitContext {
    /// Context for a real run in `root`, honouring the configured label
    /// prefix and commit setting.
    pub fn new(root: impl Into<PathBuf>, config: &AppConfig) -> Self {
        let root = root.into();
        Self {
            project: Arc::new(Project::new(root.clone())),
            shell: Shell::system(root).with_commits(config.commits_enabled()),
            prefix: config.global.prefix.clone(),
        }
    }

    /// Context with an explicit shell, typically backed by a recording
    /// runner.
    pub fn with_shell(project: Project, shell: Shell) -> Self {
        Self {
            project: Arc::new(project),
            shell,
            prefix: None,
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn shell(&self) -> &Shell {
        &self.shell
    }

    /// Status line label: the configured prefix or the recipe default.
    pub fn label(&self, default: &str) -> String {
        self.prefix.clone().unwrap_or_else(|| default.to_string())
    }

    /// Build an action from an async closure over the project and shell.
    pub(crate) fn act<F, Fut>(&self, f: F) -> Action
    where
        F: Fn(Arc<Project>, Shell) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        let project = Arc::clone(&self.project);
        let shell = self.shell.clone();
        action(move || f(Arc::clone(&project), shell.clone()))
    }

    /// Build a probe from a synchronous check of the project.
    ///
    /// The check runs on the blocking pool when the probe is awaited, never
    /// earlier.
    pub(crate) fn check<F>(&self, f: F) -> Probe
    where
        F: Fn(&Project) -> ProjectResult<bool> + Send + Sync + 'static,
    {
        let project = Arc::clone(&self.project);
        let f = Arc::new(f);
        probe(move || {
            let project = Arc::clone(&project);
            let f = Arc::clone(&f);
            async move {
                let checked = tokio::task::spawn_blocking(move || f(project.as_ref())).await?;
                checked.map_err(anyhow::Error::from)
            }
        })
    }

    pub(crate) fn file_exists(&self, relative: &'static str) -> Probe {
        self.check(move |project| Ok(project.exists(relative)))
    }

    /// True when `relative` still has to be created.
    pub(crate) fn file_missing(&self, relative: &'static str) -> Probe {
        self.check(move |project| Ok(!project.exists(relative)))
    }

    pub(crate) fn has_dev_dependency(&self, name: &'static str) -> Probe {
        self.check(move |project| project.has_dev_dependency(name))
    }

    /// True when `name` still has to be installed.
    pub(crate) fn lacks_dev_dependency(&self, name: &'static str) -> Probe {
        self.check(move |project| Ok(!project.has_dev_dependency(name)?))
    }

    /// Action writing `template` to its destination and committing it.
    ///
    /// The template is resolved now, so a missing asset fails while the
    /// series is being built rather than halfway through a run.
    pub(crate) fn write_template(&self, template: Template, commit: &'static str) -> InitResult<Action> {
        let contents = Arc::new(template.contents()?);
        Ok(self.act(move |project, shell| {
            let contents = Arc::clone(&contents);
            async move {
                let destination = template.destination();
                project.write_file(destination, &contents)?;
                if template.is_executable() {
                    project.make_executable(destination)?;
                }
                shell.commit_all(commit).await?;
                Ok(())
            }
        }))
    }
}
