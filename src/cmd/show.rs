/*!
`show.rs`

Implements the `show` subcommand: detail view for a single command in
a family catalog.

Behavior:
  - With NAME: case-insensitive catalog lookup; unknown names error.
  - Without NAME: interactive numbered selection on stdin; an empty
    line or EOF cancels without error.
  - Prints the doc string and a parameter table (NAME / KIND / DEFAULT),
    or JSON carrying the raw declaration fields.

JSON Output Shape:
{
  "status": "ok",
  "family": "document",
  "source": "<path or 'defaults'>",
  "elapsed_ms": 2,
  "command": {
    "name": "move",
    "required": ["by"],
    "optional": [["extend", false]],
    "doc": "...",
    "has_arbitrary_args": false,
    "arguments": "by, extend"
  }
}
*/

use anyhow::Result;
use clap::Args;
use serde_json::json;

use crate::cmd::format::{Role, Style, TableOpts, banner, paint, table};
use crate::cmd::host::{StdioUi, builtin_registry};
use crate::cmd::shared::{build_family_catalog, find_command_case_insensitive, output_error, resolve_settings};
use crate::palette::{CommandSpec, Family, PaletteUi};

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Command family to inspect (document, window, application)
    #[arg(value_enum)]
    pub family: Family,

    /// Command name; prompts interactively when omitted
    pub name: Option<String>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    /// Settings file path (JSON or YAML); falls back to CMDPAL_CONFIG
    #[arg(short = 'c', long)]
    pub config: Option<String>,
}

pub fn execute_show(args: ShowArgs) -> Result<()> {
    let style = Style::detect();

    let mut config = args.config.clone();
    if config.is_none()
        && let Ok(env_config) = std::env::var("CMDPAL_CONFIG")
        && !env_config.trim().is_empty()
    {
        config = Some(env_config.trim().to_string());
    }

    let (settings, source) = match resolve_settings(config.as_deref()) {
        Ok(resolved) => resolved,
        Err(e) => return output_error(args.json, "Show Error", &format!("{e:#}")),
    };
    let registry = builtin_registry(args.family);
    let catalog = match build_family_catalog(&registry, &settings, args.family) {
        Ok(catalog) => catalog,
        Err(e) => return output_error(args.json, "Show Error", &format!("{e:#}")),
    };

    let spec = match &args.name {
        Some(name) => match find_command_case_insensitive(&catalog.commands, name) {
            Some(spec) => spec,
            None => {
                return output_error(
                    args.json,
                    "Show Error",
                    &format!("command '{}' not found in {} catalog", name, args.family),
                );
            }
        },
        None => {
            let rows: Vec<Vec<String>> = catalog
                .iter()
                .map(|spec| spec.description(&settings))
                .collect();
            let mut ui = StdioUi::new();
            match ui.choose(&rows) {
                Some(idx) => &catalog.commands[idx],
                None => {
                    if args.json {
                        println!("{}", serde_json::to_string_pretty(&json!({"status": "cancelled"}))?);
                    } else {
                        println!("{}", paint(Role::Dim, "(cancelled)", &style));
                    }
                    return Ok(());
                }
            }
        }
    };

    if args.json {
        let optional: Vec<_> = spec
            .optional
            .iter()
            .map(|(name, default)| json!([name, default]))
            .collect();
        let out = json!({
            "status": "ok",
            "family": args.family.to_string(),
            "source": source,
            "elapsed_ms": catalog.elapsed_ms,
            "command": {
                "name": spec.name,
                "required": spec.required,
                "optional": optional,
                "doc": spec.doc,
                "has_arbitrary_args": spec.accepts_extra_args,
                "arguments": spec.format_arguments(settings.show_boring_defaults),
            },
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let subtitle = format!("family={} • source={}", args.family, source);
    println!(
        "{}",
        banner(&format!("Command: {}", spec.name), Some(&subtitle), &style)
    );
    if let Some(doc) = &spec.doc {
        println!("{}", paint(Role::Secondary, doc, &style));
    }

    let rows = parameter_rows(spec);
    if rows.is_empty() {
        println!("{}", paint(Role::Dim, "(no parameters)", &style));
    } else {
        println!(
            "{}",
            table(&["NAME", "KIND", "DEFAULT"], &rows, TableOpts::default(), &style)
        );
    }

    let hint = if spec.has_any_args() {
        format!(
            "Run: cmdpal run {} {} --args '<{}>'",
            args.family,
            spec.name,
            spec.format_arguments(settings.show_boring_defaults)
        )
    } else {
        format!("Run: cmdpal run {} {}", args.family, spec.name)
    };
    println!("{}", paint(Role::Dim, hint, &style));
    Ok(())
}

/// One table row per declared parameter, plus a trailing `...` row when
/// the command accepts undeclared named arguments.
fn parameter_rows(spec: &CommandSpec) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    for name in &spec.required {
        rows.push(vec![name.clone(), "required".to_string(), "-".to_string()]);
    }
    for (name, default) in &spec.optional {
        rows.push(vec![name.clone(), "optional".to_string(), default.to_string()]);
    }
    if spec.accepts_extra_args {
        rows.push(vec!["...".to_string(), "any".to_string(), "-".to_string()]);
    }
    rows
}

/* ---- Tests (basic) ---- */
#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(flatten)]
        show: ShowArgs,
    }

    #[test]
    fn parses_family_with_optional_name() {
        let cli = TestCli::try_parse_from(["test", "document", "move"]).unwrap();
        assert_eq!(cli.show.family, Family::Document);
        assert_eq!(cli.show.name.as_deref(), Some("move"));

        let cli = TestCli::try_parse_from(["test", "document", "--json"]).unwrap();
        assert!(cli.show.name.is_none());
        assert!(cli.show.json);
    }

    #[test]
    fn parameter_rows_cover_required_optional_and_extra() {
        let spec = CommandSpec::new(
            "insert".to_string(),
            vec!["characters".to_string()],
            vec![("scope".to_string(), json!("line"))],
            None,
            true,
        )
        .unwrap();

        let rows = parameter_rows(&spec);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], vec!["characters", "required", "-"]);
        assert_eq!(rows[1], vec!["scope", "optional", "\"line\""]);
        assert_eq!(rows[2], vec!["...", "any", "-"]);
    }

    #[test]
    fn parameter_rows_empty_for_bare_commands() {
        let spec = CommandSpec::new("undo".to_string(), Vec::new(), Vec::new(), None, false).unwrap();
        assert!(parameter_rows(&spec).is_empty());
    }
}
