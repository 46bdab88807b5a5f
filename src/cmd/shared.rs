/*!
shared.rs - shared helpers for subcommands.

Focus:
  - resolve_settings: --config flag > CMDPAL_CONFIG env > built-in defaults
  - build_family_catalog: registry + declared commands -> sorted catalog
  - find_command_case_insensitive
  - output_error: uniform error output for --json and human modes

Goal: keep reusable, minimal logic for list/show/run. Catalogs are built
fresh on every call; no caching between invocations.
*/

use anyhow::Result;
use std::path::Path;
use std::time::Instant;

use crate::cmd::format::{Role, Style, banner, emoji, paint};
use crate::log_debug;
use crate::palette::{
    CommandRegistry, CommandSpec, Family, PaletteSettings, build_catalog, load_settings,
};

/* ---- Data Structures ---- */

/// Result of building the catalog for one family.
#[derive(Debug)]
pub struct CatalogList {
    /// Commands in display order (registered + declared, sorted by name)
    pub commands: Vec<CommandSpec>,
    /// Elapsed time (milliseconds) for the whole build
    pub elapsed_ms: u128,
}

impl CatalogList {
    /// Convenience: number of commands.
    pub fn count(&self) -> usize {
        self.commands.len()
    }

    /// Iterate over catalog entries.
    pub fn iter(&self) -> impl Iterator<Item = &CommandSpec> {
        self.commands.iter()
    }
}

/* ---- Settings Resolution ---- */

/// Resolve effective settings plus a short label for where they came from.
///
/// An explicit path wins; otherwise built-in defaults. The CMDPAL_CONFIG
/// env fallback is applied by each subcommand before calling this.
pub fn resolve_settings(config: Option<&str>) -> Result<(PaletteSettings, String)> {
    match config {
        Some(path) if !path.trim().is_empty() => {
            let path = path.trim();
            let settings = load_settings(Path::new(path))?;
            log_debug!("settings loaded from {path}");
            Ok((settings, path.to_string()))
        }
        _ => {
            log_debug!("no settings file; using built-in defaults");
            Ok((PaletteSettings::default(), "defaults".to_string()))
        }
    }
}

/* ---- Catalog Building ---- */

/// Build the full catalog for a family: registered commands (with the
/// family's context parameters stripped) plus config-declared ones.
pub fn build_family_catalog(
    registry: &CommandRegistry,
    settings: &PaletteSettings,
    family: Family,
) -> Result<CatalogList> {
    let started = Instant::now();
    let registered = registry.specs(family.context_skip())?;
    let commands = build_catalog(registered, settings.commands_for(family))?;
    log_debug!(
        "catalog for family {family}: {} registered + {} declared",
        registry.len(),
        settings.commands_for(family).len()
    );
    Ok(CatalogList {
        commands,
        elapsed_ms: started.elapsed().as_millis(),
    })
}

/* ---- Lookup ---- */

/// Find a command by name, case-insensitive, first match wins.
pub fn find_command_case_insensitive<'a>(
    commands: &'a [CommandSpec],
    name: &str,
) -> Option<&'a CommandSpec> {
    commands
        .iter()
        .find(|cmd| cmd.name.eq_ignore_ascii_case(name))
}

/* ---- Output Helpers ---- */

/// Print an error in the requested mode, then fail the subcommand.
pub fn output_error(json: bool, title: &str, msg: &str) -> Result<()> {
    if json {
        let err = serde_json::json!({"status":"error","error":msg});
        println!(
            "{}",
            serde_json::to_string_pretty(&err).unwrap_or_else(|_| err.to_string())
        );
    } else {
        let style = Style::detect();
        let heading = format!("{} {title}", emoji("error", &style));
        let subtitle = paint(Role::Error, msg, &style);
        println!("{}", banner(heading, Some(&subtitle), &style));
    }
    anyhow::bail!(msg.to_string())
}

/* ---- Tests (basic) ---- */
#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::{PaletteCommand, Param, Signature};
    use serde_json::json;

    struct MoveCommand;

    impl PaletteCommand for MoveCommand {
        fn signature(&self) -> Signature {
            Signature::new(vec![
                Param::required("view"),
                Param::required("by"),
                Param::optional("extend", json!(false)),
            ])
        }

        fn run(&mut self, _args: &serde_json::Map<String, serde_json::Value>) -> Result<()> {
            Ok(())
        }
    }

    fn settings_with_document_command() -> PaletteSettings {
        serde_json::from_value(json!({
            "document_commands": [
                {"name": "jump", "args": ["line", ["column", 0]]}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn family_catalog_merges_registered_and_declared() {
        let mut registry = CommandRegistry::new();
        registry.register(MoveCommand);
        let settings = settings_with_document_command();

        let list = build_family_catalog(&registry, &settings, Family::Document).unwrap();
        let names: Vec<&str> = list.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["jump", "move"]);
        // Document family strips the leading view parameter.
        assert_eq!(list.commands[1].required, vec!["by"]);
    }

    #[test]
    fn window_family_ignores_document_declarations() {
        let registry = CommandRegistry::new();
        let settings = settings_with_document_command();
        let list = build_family_catalog(&registry, &settings, Family::Window).unwrap();
        assert_eq!(list.count(), 0);
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let commands = vec![
            CommandSpec::new("move", vec![], vec![], None, false).unwrap(),
            CommandSpec::new("save_all", vec![], vec![], None, false).unwrap(),
        ];
        let found = find_command_case_insensitive(&commands, "MOVE").unwrap();
        assert_eq!(found.name, "move");
        assert!(find_command_case_insensitive(&commands, "missing").is_none());
    }

    #[test]
    fn resolve_settings_defaults_without_a_path() {
        let (settings, source) = resolve_settings(None).unwrap();
        assert!(settings.show_arguments);
        assert_eq!(source, "defaults");

        let (_, source) = resolve_settings(Some("   ")).unwrap();
        assert_eq!(source, "defaults");
    }
}
