//! Palette display and declaration settings.
//!
//! PaletteSettings -> display flags + per-family declared commands
//! load_settings -> read a JSON or YAML settings file by extension
//!
//! Settings are plain data passed to whoever needs them; there is no
//! process-wide settings object.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::palette::catalog::DeclaredCommand;
use crate::palette::family::Family;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PaletteSettings {
    /// Show each command's argument shape in the chooser.
    pub show_arguments: bool,
    /// Show the first doc line in the chooser.
    pub show_doc: bool,
    /// Render defaults like `false` or `0` instead of just the name.
    pub show_boring_defaults: bool,
    pub document_commands: Vec<DeclaredCommand>,
    pub window_commands: Vec<DeclaredCommand>,
    pub application_commands: Vec<DeclaredCommand>,
}

impl Default for PaletteSettings {
    fn default() -> Self {
        Self {
            show_arguments: true,
            show_doc: true,
            show_boring_defaults: false,
            document_commands: Vec::new(),
            window_commands: Vec::new(),
            application_commands: Vec::new(),
        }
    }
}

impl PaletteSettings {
    /// Declared commands for one family.
    pub fn commands_for(&self, family: Family) -> &[DeclaredCommand] {
        match family {
            Family::Document => &self.document_commands,
            Family::Window => &self.window_commands,
            Family::Application => &self.application_commands,
        }
    }
}

/// Load settings from a file, picking the format by extension
/// (`.yaml` / `.yml` -> YAML, anything else -> JSON).
pub fn load_settings(path: &Path) -> Result<PaletteSettings> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml" | "yml")
    );
    let settings = if is_yaml {
        serde_yaml::from_str(&raw)
            .with_context(|| format!("Failed to parse YAML settings: {}", path.display()))?
    } else {
        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse JSON settings: {}", path.display()))?
    };
    Ok(settings)
}

/* --------------------------------- Tests ---------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_favor_a_descriptive_chooser() {
        let settings = PaletteSettings::default();
        assert!(settings.show_arguments);
        assert!(settings.show_doc);
        assert!(!settings.show_boring_defaults);
        assert!(settings.document_commands.is_empty());
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let settings: PaletteSettings =
            serde_json::from_str(r#"{"show_doc": false, "window_commands": [{"name": "close_all"}]}"#)
                .unwrap();
        assert!(settings.show_arguments, "untouched flag keeps its default");
        assert!(!settings.show_doc);
        assert_eq!(settings.window_commands.len(), 1);
        assert_eq!(settings.window_commands[0].name, "close_all");
    }

    #[test]
    fn commands_for_routes_by_family() {
        let settings: PaletteSettings = serde_json::from_str(
            r#"{
                "document_commands": [{"name": "doc_cmd"}],
                "application_commands": [{"name": "app_cmd"}]
            }"#,
        )
        .unwrap();
        assert_eq!(settings.commands_for(Family::Document).len(), 1);
        assert!(settings.commands_for(Family::Window).is_empty());
        assert_eq!(settings.commands_for(Family::Application)[0].name, "app_cmd");
    }

    #[test]
    fn load_settings_picks_format_by_extension() {
        let dir = std::env::temp_dir();

        let json_path = dir.join("cmdpal-settings-test.json");
        std::fs::write(&json_path, r#"{"show_doc": false}"#).unwrap();
        let settings = load_settings(&json_path).unwrap();
        assert!(!settings.show_doc);
        std::fs::remove_file(&json_path).ok();

        let yaml_path = dir.join("cmdpal-settings-test.yaml");
        std::fs::write(
            &yaml_path,
            "show_boring_defaults: true\nwindow_commands:\n  - name: close_all\n",
        )
        .unwrap();
        let settings = load_settings(&yaml_path).unwrap();
        assert!(settings.show_boring_defaults);
        assert_eq!(settings.window_commands.len(), 1);
        std::fs::remove_file(&yaml_path).ok();
    }

    #[test]
    fn load_settings_reports_missing_file() {
        let err = load_settings(Path::new("/nonexistent/cmdpal-settings.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }
}
