//! Combined setup of several recipes in one invocation.

use super::context::InitContext;
use super::error::InitResult;
use super::{editorconfig, prettier, tslint};
use crate::engine::{Series, TaskManager};
use qk_protocol::report_models::SeriesReport;

/// One scaffolding recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recipe {
    Prettier,
    EditorConfig,
    Tslint,
}

impl Recipe {
    pub fn build(self, manager: &TaskManager, context: &InitContext) -> InitResult<Series> {
        match self {
            Recipe::Prettier => prettier::prettier_series(manager, context),
            Recipe::EditorConfig => editorconfig::editorconfig_series(manager, context),
            Recipe::Tslint => tslint::tslint_series(manager, context),
        }
    }
}

/// Recipes requested with `setup`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SetupSelection {
    pub prettier: bool,
    pub editorconfig: bool,
    pub tslint: bool,
}

impl SetupSelection {
    /// Selected recipes in execution order. An empty selection means
    /// prettier followed by editorconfig.
    pub fn recipes(self) -> Vec<Recipe> {
        if self == Self::default() {
            return vec![Recipe::Prettier, Recipe::EditorConfig];
        }

        [
            (self.prettier, Recipe::Prettier),
            (self.editorconfig, Recipe::EditorConfig),
            (self.tslint, Recipe::Tslint),
        ]
        .into_iter()
        .filter_map(|(selected, recipe)| selected.then_some(recipe))
        .collect()
    }
}

/// Build every selected series, then run them one after another.
///
/// All series are built before the first one runs, so a recipe that cannot
/// be registered (e.g. no `package.json`) fails before anything changes.
pub async fn run_setup(
    manager: &TaskManager,
    context: &InitContext,
    selection: SetupSelection,
) -> InitResult<Vec<SeriesReport>> {
    let series = selection
        .recipes()
        .into_iter()
        .map(|recipe| recipe.build(manager, context))
        .collect::<InitResult<Vec<_>>>()?;

    let mut reports = Vec::with_capacity(series.len());
    for series in series {
        reports.push(series.run().await?);
    }
    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init::testing::Fixture;
    use crate::init::InitError;

    #[test]
    fn test_empty_selection_defaults() {
        assert_eq!(
            SetupSelection::default().recipes(),
            vec![Recipe::Prettier, Recipe::EditorConfig]
        );
    }

    #[test]
    fn test_selection_order_is_fixed() {
        let selection = SetupSelection {
            prettier: false,
            editorconfig: true,
            tslint: true,
        };
        assert_eq!(selection.recipes(), vec![Recipe::EditorConfig, Recipe::Tslint]);

        let all = SetupSelection {
            prettier: true,
            editorconfig: true,
            tslint: true,
        };
        assert_eq!(
            all.recipes(),
            vec![Recipe::Prettier, Recipe::EditorConfig, Recipe::Tslint]
        );
    }

    #[tokio::test]
    async fn test_runs_series_in_order() {
        let fixture = Fixture::new(true).with_package_json(r#"{"name":"app"}"#);
        let selection = SetupSelection {
            prettier: false,
            editorconfig: true,
            tslint: true,
        };

        let reports = run_setup(&fixture.manager, &fixture.context, selection)
            .await
            .unwrap();

        let names: Vec<&str> = reports.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Setting up EditorConfig", "Setting up TSLint"]);
        let banners: Vec<String> = fixture
            .sink
            .persisted()
            .into_iter()
            .filter(|line| line.starts_with("Setting up"))
            .collect();
        assert_eq!(banners, vec!["Setting up EditorConfig", "Setting up TSLint"]);
    }

    #[tokio::test]
    async fn test_missing_package_json_fails_before_running() {
        let fixture = Fixture::new(false);

        let result = run_setup(&fixture.manager, &fixture.context, SetupSelection::default()).await;

        assert!(matches!(result, Err(InitError::MissingPackageJson(_))));
        assert!(fixture.sink.persisted().is_empty());
        assert!(!fixture.exists(".editorconfig"));
    }
}
