//! EditorConfig recipe.

use super::context::InitContext;
use super::error::InitResult;
use super::templates::Template;
use crate::engine::{ConditionalTask, ProbeMessage, Series, TaskManager};
use qk_protocol::report_models::SeriesReport;

pub const LABEL: &str = "[editorconfig]";

/// Series creating `.editorconfig` unless the project already has one.
pub fn editorconfig_series(manager: &TaskManager, context: &InitContext) -> InitResult<Series> {
    let template = Template::EditorConfig;
    let mut series = manager.create_series("Setting up EditorConfig", context.label(LABEL));

    series.conditional_task(
        ConditionalTask::new(
            ProbeMessage::choose(|missing| {
                if missing {
                    "Creating EditorConfig configuration file"
                } else {
                    "EditorConfig configuration file"
                }
            }),
            context.file_missing(template.destination()),
        )
        .on_true(context.write_template(template, "style(editorconfig): create editorconfig file")?)
        .message_when_false("already exists"),
    )?;

    Ok(series)
}

pub async fn init_editorconfig(manager: &TaskManager, context: &InitContext) -> InitResult<SeriesReport> {
    let series = editorconfig_series(manager, context)?;
    Ok(series.run().await?)
}
