/*!
`run.rs`

Implements the `run` subcommand: parse one-line argument text, merge
positionals into the declared parameter order, and dispatch.

Behavior:
  - With NAME: case-insensitive catalog lookup; argument text comes from
    `--args` or, when the command declares parameters, a stdin prompt.
    Suitable for scripting (`--args` given means no prompts at all).
  - Without NAME: full interactive palette (numbered chooser, prompt,
    dispatch) driven by the stdio UI.
  - Malformed argument text or a failed merge prints the error and exits
    nonzero without dispatching. Dispatch failures are printed and
    propagated.

JSON Output Shape:
{
  "status": "ok",
  "family": "document",
  "command": "move",
  "arguments": {"by": "words", "extend": true},
  "elapsed_ms": 4
}
*/

use anyhow::Result;
use clap::Args;
use serde_json::{Map, Value, json};
use std::time::Instant;

use crate::cmd::format::{Role, Style, TableOpts, banner, emoji, paint, table};
use crate::cmd::host::{HostRunner, StdioUi, builtin_registry};
use crate::cmd::shared::{CatalogList, build_family_catalog, find_command_case_insensitive, output_error, resolve_settings};
use crate::palette::{
    Family, Outcome, PaletteSettings, PaletteUi, dispatch, merge_positional_args, parse_arguments,
    run_palette,
};
use crate::{log_debug, log_info};

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Command family to dispatch into (document, window, application)
    #[arg(value_enum)]
    pub family: Family,

    /// Command name; opens the interactive palette when omitted
    pub name: Option<String>,

    /// One-line argument text, e.g. '"words", extend=true'
    #[arg(long = "args", value_name = "TEXT")]
    pub arg_text: Option<String>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    /// Settings file path (JSON or YAML); falls back to CMDPAL_CONFIG
    #[arg(short = 'c', long)]
    pub config: Option<String>,
}

pub fn execute_run(args: RunArgs) -> Result<()> {
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
        Err(e) => return output_error(args.json, "Run Error", &format!("{e:#}")),
    };
    log_debug!("run settings source: {source}");
    let registry = builtin_registry(args.family);
    let catalog = match build_family_catalog(&registry, &settings, args.family) {
        Ok(catalog) => catalog,
        Err(e) => return output_error(args.json, "Run Error", &format!("{e:#}")),
    };
    let mut runner = HostRunner::new(registry);

    let Some(name) = &args.name else {
        return run_interactive(&catalog, &settings, &mut runner, &args, &style);
    };

    let Some(spec) = find_command_case_insensitive(&catalog.commands, name) else {
        return output_error(
            args.json,
            "Run Error",
            &format!("command '{}' not found in {} catalog", name, args.family),
        );
    };

    let text = match &args.arg_text {
        Some(text) => text.clone(),
        None if spec.has_any_args() => {
            let label = format!("{}:", spec.format_arguments(settings.show_boring_defaults));
            let mut ui = StdioUi::new();
            match ui.prompt_text(&label, "") {
                Some(text) => text,
                None => return print_cancelled(args.json, &style),
            }
        }
        None => String::new(),
    };

    let merged = match parse_arguments(&text).and_then(|parsed| merge_positional_args(spec, parsed))
    {
        Ok(map) => map,
        Err(e) => return output_error(args.json, "Argument Error", &e.to_string()),
    };

    let started = Instant::now();
    if let Err(e) = dispatch(&mut runner, &spec.name, &merged) {
        return output_error(args.json, "Run Error", &e.to_string());
    }
    let elapsed_ms = started.elapsed().as_millis();
    log_info!(
        "ran '{}' ({} argument(s)) in {} ms",
        spec.name,
        merged.len(),
        elapsed_ms
    );

    if args.json {
        let out = json!({
            "status": "ok",
            "family": args.family.to_string(),
            "command": spec.name,
            "arguments": merged,
            "elapsed_ms": elapsed_ms,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }
    print_success(&spec.name, Some(&merged), elapsed_ms, args.family, &style);
    Ok(())
}

/// Palette flow: chooser, prompt, dispatch, all through the stdio UI.
fn run_interactive(
    catalog: &CatalogList,
    settings: &PaletteSettings,
    runner: &mut HostRunner,
    args: &RunArgs,
    style: &Style,
) -> Result<()> {
    let mut ui = StdioUi::new();
    let started = Instant::now();
    match run_palette(&catalog.commands, settings, &mut ui, runner) {
        Ok(Outcome::Cancelled) => print_cancelled(args.json, style),
        // Parse or merge failed; the UI already surfaced the details.
        Ok(Outcome::Aborted) => anyhow::bail!("invalid arguments"),
        Ok(Outcome::Ran(name)) => {
            let elapsed_ms = started.elapsed().as_millis();
            log_info!("ran '{name}' in {elapsed_ms} ms");
            if args.json {
                let out = json!({
                    "status": "ok",
                    "family": args.family.to_string(),
                    "command": name,
                    "elapsed_ms": elapsed_ms,
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                print_success(&name, None, elapsed_ms, args.family, style);
            }
            Ok(())
        }
        // Dispatch failed; the UI already surfaced the details.
        Err(e) => Err(e.into()),
    }
}

fn print_cancelled(json: bool, style: &Style) -> Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({"status": "cancelled"}))?
        );
    } else {
        println!("{}", paint(Role::Dim, "(cancelled)", style));
    }
    Ok(())
}

fn print_success(
    name: &str,
    arguments: Option<&Map<String, Value>>,
    elapsed_ms: u128,
    family: Family,
    style: &Style,
) {
    let subtitle = format!("family={family} • {elapsed_ms} ms");
    println!(
        "{}",
        banner(
            &format!("{} Ran ({name})", emoji("success", style)),
            Some(&subtitle),
            style
        )
    );
    match arguments {
        Some(map) if !map.is_empty() => {
            let rows: Vec<Vec<String>> = map
                .iter()
                .map(|(key, value)| {
                    let shown = match value {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    };
                    vec![key.clone(), shown]
                })
                .collect();
            println!(
                "{}",
                table(&["NAME", "VALUE"], &rows, TableOpts::default(), style)
            );
        }
        Some(_) => println!("{}", paint(Role::Dim, "No arguments supplied", style)),
        None => {}
    }
}

/* ---- Tests (basic) ---- */
