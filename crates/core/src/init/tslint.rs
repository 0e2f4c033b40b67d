//! TSLint recipe.

use super::context::InitContext;
use super::error::InitResult;
use super::templates::Template;
use crate::engine::{ConditionalTask, ProbeMessage, Series, TaskManager};
use qk_protocol::report_models::SeriesReport;

pub const LABEL: &str = "[tslint]";

pub const LINT_COMMAND: &str = "tslint -p .";

/// Series installing tslint, its configuration file and the `lint` script.
///
/// # Errors
///
/// Returns [`InitError::MissingPackageJson`](super::InitError::MissingPackageJson)
/// if the project has no `package.json`.
pub fn tslint_series(manager: &TaskManager, context: &InitContext) -> InitResult<Series> {
    context.project().require_package_json()?;

    let config = Template::TslintConfig;
    let mut series = manager.create_series("Setting up TSLint", context.label(LABEL));

    series
        .conditional_task(
            ConditionalTask::new(
                ProbeMessage::choose(|missing| {
                    if missing {
                        "Installing TSLint package"
                    } else {
                        "TSLint package"
                    }
                }),
                context.lacks_dev_dependency("tslint"),
            )
            .on_true(context.act(|_, shell| async move {
                shell.npm_install_dev(&["tslint"]).await?;
                shell.commit_all("style(package.json): install tslint").await?;
                Ok(())
            }))
            .message_when_false("already installed"),
        )?
        .conditional_task(
            ConditionalTask::new(
                ProbeMessage::choose(|missing| {
                    if missing {
                        "Creating TSLint configuration file"
                    } else {
                        "TSLint configuration file"
                    }
                }),
                context.file_missing(config.destination()),
            )
            .on_true(context.write_template(config, "style(tslint): create tslint configuration")?)
            .message_when_false("already exists"),
        )?
        .task(
            "Updating lint script",
            context.act(|project, shell| async move {
                project.set_script("lint", LINT_COMMAND)?;
                shell
                    .commit_all("style(package.json): update tslint scripts")
                    .await?;
                Ok(())
            }),
        )?;

    Ok(series)
}

pub async fn init_tslint(manager: &TaskManager, context: &InitContext) -> InitResult<SeriesReport> {
    let series = tslint_series(manager, context)?;
    Ok(series.run().await?)
}
