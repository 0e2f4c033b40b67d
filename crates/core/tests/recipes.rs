//! Scaffolding recipes run against temporary projects.
//!
//! External commands go through a recording runner; files are real.

mod common;

use common::fixtures::*;
use qk_core::config::{load_config, CONFIG_FILE_NAME};
use qk_core::engine::SeriesError;
use qk_core::init::{init_editorconfig, run_setup, InitContext, InitError, SetupSelection};
use qk_core::project::Project;
use qk_core::shell::{CommandOutput, RecordingRunner, Shell};
use qk_protocol::config_models::SpinnerConfig;
use qk_protocol::report_models::StepStatus;
use std::path::Path;
use std::sync::Arc;

fn context(root: &Path, runner: &Arc<RecordingRunner>) -> InitContext {
    InitContext::with_shell(Project::new(root), Shell::with_runner(root, runner.clone()))
}

#[tokio::test]
async fn test_setup_everything_on_a_fresh_project() {
    let dir = npm_project(r#"{"name":"app","version":"1.0.0"}"#).unwrap();
    let runner = Arc::new(RecordingRunner::new());
    runner.respond("git diff-index --quiet HEAD", CommandOutput::exit(1));
    let (manager, log) = logging_manager(false, SpinnerConfig::disabled());

    let selection = SetupSelection {
        prettier: true,
        editorconfig: true,
        tslint: true,
    };
    let reports = run_setup(&manager, &context(dir.path(), &runner), selection)
        .await
        .unwrap();

    assert_eq!(reports.len(), 3);
    for file in [".prettierrc.js", ".prettierignore", ".husky/pre-commit", ".editorconfig", "tslint.json"] {
        assert!(dir.path().join(file).exists(), "{file} should be written");
    }

    let package: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("package.json")).unwrap())
            .unwrap();
    let keys: Vec<&String> = package.as_object().unwrap().keys().collect();
    assert_eq!(keys, vec!["name", "version", "scripts", "lint-staged"]);
    assert_eq!(package["scripts"]["lint"], "tslint -p .");

    let commits = runner
        .commands()
        .into_iter()
        .filter(|command| command.starts_with("git commit"))
        .count();
    assert_eq!(commits, 12);

    let done_lines = log
        .persisted()
        .into_iter()
        .filter(|line| line.ends_with("Done!"))
        .collect::<Vec<_>>();
    assert_eq!(done_lines, vec!["[prettier] Done!", "[editorconfig] Done!", "[tslint] Done!"]);
}

#[tokio::test]
async fn test_configuration_controls_label_and_commits() {
    let dir = npm_project(r#"{"name":"app"}"#).unwrap();
    std::fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        "prefix = \"[acme]\"\n\n[git]\ncommit = false\n",
    )
    .unwrap();
    let config = load_config(dir.path()).await.unwrap();

    let runner = Arc::new(RecordingRunner::new());
    let shell = Shell::with_runner(dir.path(), runner.clone()).with_commits(config.commits_enabled());
    let mut context = InitContext::with_shell(Project::new(dir.path()), shell);
    if let Some(prefix) = &config.global.prefix {
        context = context.with_prefix(prefix.clone());
    }
    let (manager, log) = logging_manager(false, SpinnerConfig::disabled());

    init_editorconfig(&manager, &context).await.unwrap();

    assert!(dir.path().join(".editorconfig").exists());
    assert!(runner.commands().is_empty(), "commits are disabled");
    assert_eq!(log.persisted().last().unwrap(), "[acme] Done!");
}

#[tokio::test]
async fn test_dry_run_setup_leaves_project_untouched() {
    let package = r#"{"name":"app","devDependencies":{"@types/prettier":"^2.0.0"}}"#;
    let dir = npm_project(package).unwrap();
    let runner = Arc::new(RecordingRunner::new());
    let (manager, _log) = logging_manager(true, SpinnerConfig::disabled());

    let reports = run_setup(&manager, &context(dir.path(), &runner), SetupSelection::default())
        .await
        .unwrap();

    assert_eq!(reports.len(), 2);
    assert!(reports.iter().all(|report| report.dry_run));
    assert_eq!(reports[0].steps[3].status, StepStatus::Done);
    assert!(runner.commands().is_empty());
    assert_eq!(
        std::fs::read_to_string(dir.path().join("package.json")).unwrap(),
        package
    );
    let entries = std::fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(entries, 1, "only package.json should exist");
}

#[tokio::test]
async fn test_failing_command_aborts_setup() {
    let dir = npm_project(r#"{"name":"app"}"#).unwrap();
    let runner = Arc::new(RecordingRunner::new());
    runner.respond(
        "npm run format:write",
        CommandOutput::exit(2).with_stderr("SyntaxError: Unexpected token\n"),
    );
    let (manager, log) = logging_manager(false, SpinnerConfig::disabled());

    let err = run_setup(&manager, &context(dir.path(), &runner), SetupSelection::default())
        .await
        .unwrap_err();

    match &err {
        InitError::Series(SeriesError::StepExecution { index, message, .. }) => {
            assert_eq!(*index, 5);
            assert_eq!(message, "Applying prettier rules after upgrade");
        }
        other => panic!("Expected a step failure, got {other:?}"),
    }
    assert!(err.to_string().contains("SyntaxError"));
    assert!(!dir.path().join(".editorconfig").exists(), "editorconfig never ran");
    assert!(!log.persisted().iter().any(|line| line.contains("Done!")));
    assert_eq!(manager.ticker_counters().active(), 0);
}

#[tokio::test]
async fn test_created_files_are_done_then_skipped_on_rerun() {
    let dir = npm_project(r#"{"name":"app"}"#).unwrap();
    let runner = Arc::new(RecordingRunner::new());
    let selection = SetupSelection {
        prettier: true,
        editorconfig: true,
        tslint: true,
    };
    // (report, step) pairs of every step that writes a template.
    let creations = [(0, 7), (0, 9), (0, 13), (1, 0), (2, 1)];

    let (manager, _log) = logging_manager(false, SpinnerConfig::disabled());
    let first = run_setup(&manager, &context(dir.path(), &runner), selection)
        .await
        .unwrap();
    for (report, step) in creations {
        let step = &first[report].steps[step];
        assert_eq!(step.status, StepStatus::Done, "{}", step.message);
        assert!(step.message.starts_with("Creating"), "{}", step.message);
        assert_eq!(step.suffix, None);
    }

    let (manager, log) = logging_manager(false, SpinnerConfig::disabled());
    let second = run_setup(&manager, &context(dir.path(), &runner), selection)
        .await
        .unwrap();
    for (report, step) in creations {
        let step = &second[report].steps[step];
        assert_eq!(step.status, StepStatus::Skipped, "{}", step.message);
        assert!(!step.message.starts_with("Creating"), "{}", step.message);
        assert_eq!(step.suffix.as_deref(), Some("already exists"));
    }
    assert!(log
        .persisted()
        .contains(&"[editorconfig] ↷ [1/1] EditorConfig configuration file, skipped. already exists".to_string()));
}
