use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::Path;

mod cmd;
mod palette;
mod utils;

use cmd::{ListArgs, RunArgs, ShowArgs};

/// cmdpal - command palette CLI (modularized: see cmd/{list,show,run,host,shared}.rs)
///
/// Command layout (modular):
///   cmdpal list <family> [--json] [-c "<settings>"]
///   cmdpal show <family> [NAME] [--json] [-c "<settings>"]
///   cmdpal run  <family> [NAME] [--args "<text>"] [--json] [-c "<settings>"]
///
/// Notes:
///   - show : detail for a single command; if NAME omitted, interactive selection prompts
///   - run  : with NAME dispatches directly; without NAME opens the interactive palette
///
/// Global flags / env:
///   -v / -vv        Increase verbosity
///   -q / --quiet    Errors only
///   CMDPAL_CONFIG   Settings file fallback when -c/--config not provided
///
/// Families:
///   document     - commands addressed to the focused document
///   window       - commands addressed to the focused window
///   application  - commands addressed to the application itself
///
/// Settings keys (JSON or YAML):
///   show_arguments, show_doc, show_boring_defaults
///   document_commands / window_commands / application_commands
///
/// Argument text (one line, comma separated):
///   positional JSON literals first, then name=JSON pairs
///   e.g.  "words", extend=true   or   {"x": 1}, scope="line"
///
/// Examples:
///   cmdpal list document -c pal.yaml
///   cmdpal show document move -c pal.yaml --json
///   cmdpal run document move --args '"words", extend=true' -c pal.yaml
///   cmdpal run document -c pal.yaml   (interactive palette)
///   CMDPAL_CONFIG=pal.yaml cmdpal list application --json
#[derive(Parser, Debug)]
#[command(
    name = "cmdpal",
    version,
    author,
    about = "cmdpal - command palette front end for declared and built-in commands",
    propagate_version = true,
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Silence all non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the command catalog for a family
    List(ListArgs),

    /// Show detail for a single command
    Show(ShowArgs),

    /// Dispatch a command (interactive palette when NAME omitted)
    Run(RunArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let level = utils::derive_level(cli.verbose, cli.quiet);
    utils::init_logging(level);

    // Validate CMDPAL_CONFIG if present
    if let Ok(env_config) = std::env::var("CMDPAL_CONFIG")
        && !env_config.trim().is_empty()
        && let Err(e) = palette::load_settings(Path::new(env_config.trim()))
    {
        eprintln!("Invalid settings file '{}': {e:#}", env_config.trim());
        std::process::exit(2);
    }

    match cli.command {
        Commands::List(args) => cmd::execute_list(args),
        Commands::Show(args) => cmd::execute_show(args),
        Commands::Run(args) => cmd::execute_run(args),
    }
}
