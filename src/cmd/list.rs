/*!
`list.rs`

Implements the `list` subcommand for the `cmdpal` CLI.

Behavior:
  - If no explicit `--config` is provided, falls back to the `CMDPAL_CONFIG`
    environment variable (if present & non-empty); otherwise built-in
    defaults apply.
  - Builds the catalog for the requested family (registered commands
    merged with config-declared ones, sorted by name) and prints either
    a human-readable table or JSON.

JSON Output Shape:
{
  "status": "ok",
  "family": "application",
  "source": "<path or 'defaults'>",
  "elapsed_ms": 12,
  "count": 3,
  "commands": [
    {"name": "...", "arguments": "...", "doc": "...", "has_arbitrary_args": false},
    ...
  ]
}
*/

use anyhow::Result;
use clap::Args;
use serde_json::json;

use crate::cmd::format::{Role, Style, TableOpts, banner, emoji, paint, table};
use crate::cmd::host::builtin_registry;
use crate::cmd::shared::{build_family_catalog, output_error, resolve_settings};
use crate::log_debug;
use crate::palette::Family;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Command family to list (document, window, application)
    #[arg(value_enum)]
    pub family: Family,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    /// Settings file path (JSON or YAML); falls back to CMDPAL_CONFIG
    #[arg(short = 'c', long)]
    pub config: Option<String>,
}

pub fn execute_list(args: ListArgs) -> Result<()> {
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
        Err(e) => return output_error(args.json, "List Error", &format!("{e:#}")),
    };
    let registry = builtin_registry(args.family);
    let catalog = match build_family_catalog(&registry, &settings, args.family) {
        Ok(catalog) => catalog,
        Err(e) => return output_error(args.json, "List Error", &format!("{e:#}")),
    };
    log_debug!(
        "listed {} {} command(s) in {} ms",
        catalog.count(),
        args.family,
        catalog.elapsed_ms
    );

    if args.json {
        let commands: Vec<_> = catalog
            .iter()
            .map(|spec| {
                json!({
                    "name": spec.name,
                    "arguments": spec.format_arguments(settings.show_boring_defaults),
                    "doc": spec.doc,
                    "has_arbitrary_args": spec.accepts_extra_args,
                })
            })
            .collect();
        let out = json!({
            "status": "ok",
            "family": args.family.to_string(),
            "source": source,
            "elapsed_ms": catalog.elapsed_ms,
            "count": catalog.count(),
            "commands": commands,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let subtitle = format!(
        "family={} • source={} • {} ms",
        args.family, source, catalog.elapsed_ms
    );
    println!(
        "{}",
        banner(
            &format!("{} Commands ({})", emoji("list", &style), catalog.count()),
            Some(&subtitle),
            &style
        )
    );

    if catalog.count() == 0 {
        println!("{}", paint(Role::Dim, "(none)", &style));
        return Ok(());
    }

    let rows: Vec<Vec<String>> = catalog
        .iter()
        .enumerate()
        .map(|(i, spec)| {
            let arguments = if spec.has_any_args() {
                spec.format_arguments(settings.show_boring_defaults)
            } else {
                "No arguments".to_string()
            };
            let doc = spec
                .doc
                .as_deref()
                .and_then(|d| d.lines().next())
                .unwrap_or("-")
                .to_string();
            vec![(i + 1).to_string(), spec.name.clone(), arguments, doc]
        })
        .collect();
    println!(
        "{}",
        table(
            &["#", "NAME", "ARGUMENTS", "DOC"],
            &rows,
            TableOpts::default(),
            &style
        )
    );
    println!(
        "{}",
        paint(
            Role::Dim,
            format!(
                "Use `cmdpal show {} <name>` for details, `cmdpal run {} <name>` to dispatch.",
                args.family, args.family
            ),
            &style
        )
    );
    Ok(())
}

/* ---- Tests (basic) ---- */
#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(flatten)]
        list: ListArgs,
    }

    #[test]
    fn parses_family_and_flags() {
        let cli = TestCli::try_parse_from(["test", "application", "--json"]).unwrap();
        assert_eq!(cli.list.family, Family::Application);
        assert!(cli.list.json);
        assert!(cli.list.config.is_none());
    }

    #[test]
    fn parses_config_short_flag() {
        let cli = TestCli::try_parse_from(["test", "window", "-c", "pal.yaml"]).unwrap();
        assert_eq!(cli.list.family, Family::Window);
        assert_eq!(cli.list.config.as_deref(), Some("pal.yaml"));
    }

    #[test]
    fn rejects_unknown_family() {
        assert!(TestCli::try_parse_from(["test", "galaxy"]).is_err());
    }
}
