//! Prettier recipe.
//!
//! Upgrades prettier, switches the project to the shared
//! `@fashioncloud/prettier-config`, adds `format:*` scripts and wires a
//! husky pre-commit hook running lint-staged. Every change is committed on
//! its own so the history shows what the formatter touched.

use super::context::InitContext;
use super::error::InitResult;
use super::templates::Template;
use crate::engine::{ConditionalTask, ProbeMessage, Series, TaskManager};
use crate::shell::Shell;
use qk_protocol::report_models::SeriesReport;
use serde_json::json;

pub const LABEL: &str = "[prettier]";

/// Configuration file replaced by `.prettierrc.js`.
pub const LEGACY_CONFIG: &str = ".prettierrc.json";

pub const SHARED_CONFIG_PACKAGE: &str = "@fashioncloud/prettier-config";

const FORMAT_CHECK: &str =
    r#"prettier --config ./.prettierrc.js --check "./app/**/*.ts" "./tests/**/*.ts""#;
const FORMAT_WRITE: &str =
    r#"prettier --config ./.prettierrc.js --write "./app/**/*.ts" "./tests/**/*.ts""#;

/// Run the formatter over the project and commit the result.
async fn apply_rules(shell: &Shell, commit: &str) -> anyhow::Result<()> {
    shell.npm_run("format:write").await?;
    shell.commit_all(commit).await?;
    Ok(())
}

/// Series provisioning prettier.
///
/// # Errors
///
/// Returns [`InitError::MissingPackageJson`](super::InitError::MissingPackageJson)
/// if the project has no `package.json`. Nothing is registered or run in
/// that case.
pub fn prettier_series(manager: &TaskManager, context: &InitContext) -> InitResult<Series> {
    context.project().require_package_json()?;

    let mut series = manager.create_series("Setting up Prettier", context.label(LABEL));

    series
        .conditional_task(
            ConditionalTask::new(
                ProbeMessage::choose(|exists| {
                    if exists {
                        "Applying existing prettier rules"
                    } else {
                        "Existing prettier rules"
                    }
                }),
                context.file_exists(LEGACY_CONFIG),
            )
            .on_true(context.act(|_, shell| async move {
                apply_rules(&shell, "style(root): apply existing prettier rules").await
            }))
            .message_when_false("none found"),
        )?
        .task(
            "Uninstalling existing prettier",
            context.act(|_, shell| async move {
                shell.npm_uninstall("prettier").await?;
                Ok(())
            }),
        )?
        .task(
            "Installing prettier",
            context.act(|_, shell| async move {
                shell.npm_install_dev(&["prettier"]).await?;
                shell
                    .commit_all("style(package.json): upgrade prettier package")
                    .await?;
                Ok(())
            }),
        )?
        .conditional_task(
            ConditionalTask::new(
                "Removing deprecated @types/prettier",
                context.has_dev_dependency("@types/prettier"),
            )
            .on_true(context.act(|_, shell| async move {
                shell.npm_uninstall("@types/prettier").await?;
                shell
                    .commit_all("style(package.json): remove deprecated @types/prettier package")
                    .await?;
                Ok(())
            }))
            .message_when_false("not installed"),
        )?
        .task(
            "Applying prettier rules after upgrade",
            context.act(|_, shell| async move {
                apply_rules(&shell, "style(root): apply prettier rules after upgrade").await
            }),
        )?
        .task(
            format!("Installing {SHARED_CONFIG_PACKAGE}"),
            context.act(|_, shell| async move {
                shell.npm_install_dev(&[SHARED_CONFIG_PACKAGE]).await?;
                Ok(())
            }),
        )?
        .conditional_task(
            ConditionalTask::new(
                "Removing legacy prettier configuration",
                context.file_exists(LEGACY_CONFIG),
            )
            .on_true(context.act(|project, _| async move {
                project.remove_file(LEGACY_CONFIG)?;
                Ok(())
            }))
            .message_when_false("not present"),
        )?;

    let config = Template::PrettierConfig;
    series
        .conditional_task(
            ConditionalTask::new(
                ProbeMessage::choose(|missing| {
                    if missing {
                        "Creating prettier configuration file"
                    } else {
                        "Prettier configuration file"
                    }
                }),
                context.file_missing(config.destination()),
            )
            .on_true(context.write_template(config, "style(package.json): update prettier config")?)
            .message_when_false("already exists"),
        )?
        .task(
            "Updating prettier scripts",
            context.act(|project, shell| async move {
                project.set_scripts(&[("format:check", FORMAT_CHECK), ("format:write", FORMAT_WRITE)])?;
                shell
                    .commit_all("style(package.json): update prettier scripts")
                    .await?;
                Ok(())
            }),
        )?;

    let ignore = Template::PrettierIgnore;
    series
        .conditional_task(
            ConditionalTask::new(
                ProbeMessage::choose(|missing| {
                    if missing {
                        "Creating prettier ignore file"
                    } else {
                        "Prettier ignore file"
                    }
                }),
                context.file_missing(ignore.destination()),
            )
            .on_true(context.write_template(ignore, "style(package.json): create prettier ignore file")?)
            .message_when_false("already exists"),
        )?
        .task(
            "Applying prettier rules after update",
            context.act(|_, shell| async move {
                apply_rules(&shell, "style(root): apply prettier rules after update").await
            }),
        )?
        .conditional_task(
            ConditionalTask::new(
                ProbeMessage::choose(|missing| {
                    if missing {
                        "Installing husky and lint-staged"
                    } else {
                        "Husky and lint-staged"
                    }
                }),
                context.lacks_dev_dependency("husky"),
            )
            .on_true(context.act(|_, shell| async move {
                shell.npm_install_dev(&["husky", "lint-staged"]).await?;
                shell
                    .commit_all("style(package.json): install husky and lint-staged")
                    .await?;
                Ok(())
            }))
            .message_when_false("already installed"),
        )?
        .task(
            "Configuring lint-staged",
            context.act(|project, shell| async move {
                project.set_script("prepare", "husky install")?;
                project.set_field(
                    "lint-staged",
                    json!({
                        "app/**/*.ts": "prettier --config ./.prettierrc.js --write",
                        "tests/**/*.ts": "prettier --config ./.prettierrc.js --write",
                    }),
                )?;
                shell.npm_run("prepare").await?;
                Ok(())
            }),
        )?;

    let hook = Template::PreCommitHook;
    series.conditional_task(
        ConditionalTask::new(
            ProbeMessage::choose(|missing| {
                if missing {
                    "Creating pre-commit hook"
                } else {
                    "Pre-commit hook"
                }
            }),
            context.file_missing(hook.destination()),
        )
        .on_true(context.write_template(hook, "style(package.json): create pre-commit hook")?)
        .message_when_false("already exists"),
    )?;

    Ok(series)
}

pub async fn init_prettier(manager: &TaskManager, context: &InitContext) -> InitResult<SeriesReport> {
    let series = prettier_series(manager, context)?;
    Ok(series.run().await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{SeriesError, StepPhase};
    use crate::init::testing::Fixture;
    use crate::init::InitError;
    use crate::shell::CommandOutput;
    use qk_protocol::report_models::StepStatus;

    const PACKAGE: &str = r#"{"name":"app","devDependencies":{"prettier":"^1.19.1"}}"#;

    #[tokio::test]
    async fn test_requires_package_json() {
        let fixture = Fixture::new(false);

        let result = prettier_series(&fixture.manager, &fixture.context);

        assert!(matches!(result, Err(InitError::MissingPackageJson(_))));
    }

    #[tokio::test]
    async fn test_registers_fourteen_steps() {
        let fixture = Fixture::new(true).with_package_json(PACKAGE);

        let series = prettier_series(&fixture.manager, &fixture.context).unwrap();

        assert_eq!(series.len(), 14);
        assert_eq!(series.label(), "[prettier]");
        assert_eq!(series.name(), Some("Setting up Prettier"));
    }

    #[tokio::test]
    async fn test_fresh_project() {
        let fixture = Fixture::new(false).with_package_json(PACKAGE);

        let report = init_prettier(&fixture.manager, &fixture.context)
            .await
            .unwrap();

        assert_eq!(report.steps.len(), 14);
        assert!(fixture.exists(".prettierrc.js"));
        assert!(fixture.exists(".prettierignore"));
        assert!(fixture.exists(".husky/pre-commit"));

        let package: serde_json::Value =
            serde_json::from_str(&fixture.read("package.json")).unwrap();
        assert_eq!(package["scripts"]["format:check"], FORMAT_CHECK);
        assert_eq!(package["scripts"]["format:write"], FORMAT_WRITE);
        assert_eq!(package["scripts"]["prepare"], "husky install");
        assert!(package["lint-staged"]["app/**/*.ts"].is_string());

        let commit = ["git add .", "git diff-index --quiet HEAD"];
        let mut expected = vec!["npm uninstall prettier", "npm install --save-dev prettier"];
        expected.extend(commit);
        expected.push("npm run format:write");
        expected.extend(commit);
        expected.push("npm install --save-dev @fashioncloud/prettier-config");
        expected.extend(commit);
        expected.extend(commit);
        expected.extend(commit);
        expected.push("npm run format:write");
        expected.extend(commit);
        expected.push("npm install --save-dev husky lint-staged");
        expected.extend(commit);
        expected.push("npm run prepare");
        expected.extend(commit);
        assert_eq!(fixture.runner.commands(), expected);

        insta::assert_snapshot!(fixture.sink.persisted().join("\n"), @r###"
        Setting up Prettier
        [prettier] ↷ [1/14] Existing prettier rules, skipped. none found
        [prettier] ✔ [2/14] Uninstalling existing prettier, done.
        [prettier] ✔ [3/14] Installing prettier, done.
        [prettier] ↷ [4/14] Removing deprecated @types/prettier, skipped. not installed
        [prettier] ✔ [5/14] Applying prettier rules after upgrade, done.
        [prettier] ✔ [6/14] Installing @fashioncloud/prettier-config, done.
        [prettier] ↷ [7/14] Removing legacy prettier configuration, skipped. not present
        [prettier] ✔ [8/14] Creating prettier configuration file, done.
        [prettier] ✔ [9/14] Updating prettier scripts, done.
        [prettier] ✔ [10/14] Creating prettier ignore file, done.
        [prettier] ✔ [11/14] Applying prettier rules after update, done.
        [prettier] ✔ [12/14] Installing husky and lint-staged, done.
        [prettier] ✔ [13/14] Configuring lint-staged, done.
        [prettier] ✔ [14/14] Creating pre-commit hook, done.
        [prettier] Done!
        "###);
    }

    #[tokio::test]
    async fn test_legacy_project_is_migrated() {
        let fixture = Fixture::new(false)
            .with_package_json(
                r#"{"name":"app","devDependencies":{"@types/prettier":"^1.0.0","husky":"^8.0.0"}}"#,
            )
            .with_file(LEGACY_CONFIG, "{}\n");

        let report = init_prettier(&fixture.manager, &fixture.context)
            .await
            .unwrap();

        assert!(!fixture.exists(LEGACY_CONFIG));
        assert_eq!(report.steps[0].status, StepStatus::Done);
        assert_eq!(report.steps[3].status, StepStatus::Done);
        assert_eq!(report.steps[6].status, StepStatus::Done);
        assert_eq!(report.steps[11].status, StepStatus::Skipped);
        assert_eq!(report.steps[11].message, "Husky and lint-staged");
        assert_eq!(report.steps[11].suffix.as_deref(), Some("already installed"));

        let commands = fixture.runner.commands();
        assert_eq!(commands[0], "npm run format:write");
        assert!(commands.contains(&"npm uninstall @types/prettier".to_string()));
        assert!(!commands.contains(&"npm install --save-dev husky lint-staged".to_string()));
    }

    #[tokio::test]
    async fn test_dry_run_observes_but_never_mutates() {
        let fixture = Fixture::new(true)
            .with_package_json(PACKAGE)
            .with_file(LEGACY_CONFIG, "{}\n");

        let report = init_prettier(&fixture.manager, &fixture.context)
            .await
            .unwrap();

        assert!(fixture.runner.commands().is_empty());
        assert!(fixture.exists(LEGACY_CONFIG));
        assert!(!fixture.exists(".prettierrc.js"));
        assert_eq!(fixture.read("package.json"), PACKAGE);
        assert_eq!(report.steps[0].message, "Applying existing prettier rules");
        assert_eq!(report.steps[6].status, StepStatus::Done);
    }

    #[tokio::test]
    async fn test_failed_install_stops_the_series() {
        let fixture = Fixture::new(false).with_package_json(PACKAGE);
        fixture.runner.respond(
            "npm install --save-dev prettier",
            CommandOutput::exit(1).with_stderr("npm ERR! 404\n"),
        );

        let err = init_prettier(&fixture.manager, &fixture.context)
            .await
            .unwrap_err();

        match err {
            InitError::Series(SeriesError::StepExecution { index, phase, .. }) => {
                assert_eq!(index, 3);
                assert_eq!(phase, StepPhase::Action);
            }
            other => panic!("Expected a step failure, got {other:?}"),
        }
        assert_eq!(
            fixture.sink.persisted().last().unwrap(),
            "[prettier] ✖ [3/14] Installing prettier, failed."
        );
        assert_eq!(fixture.manager.ticker_counters().active(), 0);
        assert!(!fixture.exists(".prettierrc.js"));
    }
}
