//! Embedded configuration templates.
//!
//! Template files live in the workspace root `templates/` directory and are
//! embedded into the binary with `rust-embed`, so scaffolding works without
//! any files next to the executable. File names avoid leading dots; the
//! [`Template`] enum maps each one to its destination in a project.

use super::error::{InitError, InitResult};
use rust_embed::RustEmbed;

/// Embedded template files from the `templates/` directory.
///
/// - `CARGO_MANIFEST_DIR` = `crates/core`
/// - `../../templates` = workspace root `templates/`
///
/// With the `debug-embed` feature the files are embedded in debug builds
/// too, so tests see exactly what a release binary ships.
#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/../../templates"]
pub struct TemplateAssets;

/// Get template file content by name.
///
/// # Example
/// ```
/// use qk_core::init::templates::get_template;
///
/// let config = get_template("editorconfig").expect("editorconfig should exist");
/// assert!(config.contains("root = true"));
/// ```
pub fn get_template(name: &str) -> Option<String> {
    TemplateAssets::get(name).map(|file| String::from_utf8_lossy(file.data.as_ref()).to_string())
}

/// A template and where it is written in the target project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    EditorConfig,
    PrettierConfig,
    PrettierIgnore,
    TslintConfig,
    PreCommitHook,
}

impl Template {
    pub const ALL: [Template; 5] = [
        Template::EditorConfig,
        Template::PrettierConfig,
        Template::PrettierIgnore,
        Template::TslintConfig,
        Template::PreCommitHook,
    ];

    /// Name of the embedded file.
    pub fn name(self) -> &'static str {
        match self {
            Template::EditorConfig => "editorconfig",
            Template::PrettierConfig => "prettierrc.js",
            Template::PrettierIgnore => "prettierignore",
            Template::TslintConfig => "tslint.json",
            Template::PreCommitHook => "husky-pre-commit",
        }
    }

    /// Project-relative destination path.
    pub fn destination(self) -> &'static str {
        match self {
            Template::EditorConfig => ".editorconfig",
            Template::PrettierConfig => ".prettierrc.js",
            Template::PrettierIgnore => ".prettierignore",
            Template::TslintConfig => "tslint.json",
            Template::PreCommitHook => ".husky/pre-commit",
        }
    }

    /// Whether the written file needs the execute bits (git hooks).
    pub fn is_executable(self) -> bool {
        matches!(self, Template::PreCommitHook)
    }

    pub fn contents(self) -> InitResult<String> {
        get_template(self.name()).ok_or_else(|| InitError::TemplateNotFound(self.name().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_template_is_embedded() {
        for template in Template::ALL {
            let content = template.contents();
            assert!(content.is_ok(), "{} should be embedded", template.name());
            assert!(!content.unwrap().trim().is_empty());
        }
    }

    #[test]
    fn test_get_prettier_template() {
        let content = get_template("prettierrc.js").unwrap();
        assert!(content.contains("@fashioncloud/prettier-config"));
    }

    #[test]
    fn test_tslint_template_is_valid_json() {
        let content = Template::TslintConfig.contents().unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert!(value.get("rules").is_some());
    }

    #[test]
    fn test_get_nonexistent_template() {
        assert!(get_template("nonexistent.txt").is_none());
    }

    #[test]
    fn test_every_embedded_file_has_a_template() {
        let mut embedded: Vec<String> = TemplateAssets::iter().map(|name| name.to_string()).collect();
        embedded.sort();
        let mut named: Vec<&str> = Template::ALL.iter().map(|template| template.name()).collect();
        named.sort();
        assert_eq!(embedded, named);
    }

    #[test]
    fn test_destinations_are_dotfiles_where_expected() {
        assert_eq!(Template::EditorConfig.destination(), ".editorconfig");
        assert_eq!(Template::PreCommitHook.destination(), ".husky/pre-commit");
        assert_eq!(Template::TslintConfig.destination(), "tslint.json");
    }
}
