//! External command execution for npm and git.
//!
//! Commands go through the [`CommandRunner`] trait so recipes can be
//! exercised against a recording runner instead of a real toolchain.
//! [`Shell`] layers the npm/git vocabulary used by the init recipes on top
//! of a runner.

pub mod error;
pub mod runner;

pub use error::{ShellError, ShellResult};
pub use runner::{CommandOutput, CommandRunner, RecordingRunner, SystemRunner};

use std::path::PathBuf;
use std::sync::Arc;

/// npm and git commands run inside a project directory.
#[derive(Clone)]
pub struct Shell {
    root: PathBuf,
    runner: Arc<dyn CommandRunner>,
    commit: bool,
}

impl Shell {
    /// A shell spawning real processes in `root`.
    pub fn system(root: impl Into<PathBuf>) -> Self {
        Self::with_runner(root, Arc::new(SystemRunner))
    }

    pub fn with_runner(root: impl Into<PathBuf>, runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            root: root.into(),
            runner,
            commit: true,
        }
    }

    /// Enable or disable [`Shell::commit_all`].
    pub fn with_commits(mut self, commit: bool) -> Self {
        self.commit = commit;
        self
    }

    /// Run a command and fail unless it exits successfully.
    pub async fn run(&self, program: &str, args: &[&str]) -> ShellResult<CommandOutput> {
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        let output = self.runner.run(program, &args, &self.root).await?;

        if output.success() {
            Ok(output)
        } else {
            Err(ShellError::Failed {
                command: format_command(program, &args),
                code: output.code,
                stderr: output.stderr.trim().to_string(),
            })
        }
    }

    /// `npm install --save-dev <packages>`
    pub async fn npm_install_dev(&self, packages: &[&str]) -> ShellResult<()> {
        let mut args = vec!["install", "--save-dev"];
        args.extend_from_slice(packages);
        self.run("npm", &args).await.map(|_| ())
    }

    /// `npm uninstall <package>`
    pub async fn npm_uninstall(&self, package: &str) -> ShellResult<()> {
        self.run("npm", &["uninstall", package]).await.map(|_| ())
    }

    /// `npm run <script>`
    pub async fn npm_run(&self, script: &str) -> ShellResult<()> {
        self.run("npm", &["run", script]).await.map(|_| ())
    }

    /// Stage everything and commit it if the tree differs from `HEAD`.
    ///
    /// Does nothing when commits are disabled.
    pub async fn commit_all(&self, message: &str) -> ShellResult<()> {
        if !self.commit {
            tracing::debug!("commits disabled, not committing '{}'", message);
            return Ok(());
        }

        self.run("git", &["add", "."]).await?;

        // Exit status 1 means the index differs from HEAD.
        let args = ["diff-index", "--quiet", "HEAD"].map(String::from);
        let diff = self.runner.run("git", &args, &self.root).await?;
        match diff.code {
            Some(0) => {
                tracing::debug!("nothing to commit for '{}'", message);
                Ok(())
            }
            Some(1) => self.run("git", &["commit", "-m", message]).await.map(|_| ()),
            code => Err(ShellError::Failed {
                command: format_command("git", &args),
                code,
                stderr: diff.stderr.trim().to_string(),
            }),
        }
    }
}

fn format_command(program: &str, args: &[String]) -> String {
    std::iter::once(program.to_string())
        .chain(args.iter().cloned())
        .collect::<Vec<_>>()
        .join(" ")
}
