/*!
host.rs - the reference host wired into the run subcommand.

Focus:
  - StdioUi: numbered chooser + free-text prompt on stdin
  - HostRunner: built-in registry first, otherwise one JSON invocation
    line on stdout for the embedding host to consume
  - Built-in application commands (EchoCommand, VersionCommand) that
    exercise the registration API end to end

Invocation Line Shape (stdout, one per dispatch):
  {"command":"<name>","arguments":{...}}
*/

use anyhow::{Context, Result};
use serde_json::{Map, Value, json};
use std::io::{self, Write};

use crate::cmd::format::{Role, Style, emoji, paint};
use crate::log_debug;
use crate::palette::{CommandRegistry, CommandRunner, Family, PaletteCommand, PaletteUi, Param, Signature};

/* ---- Stdio UI ---- */

/// Chooser and prompt over stdin/stdout.
///
/// Selection accepts a 1-based number or a command name; an empty line
/// (or EOF) cancels.
pub struct StdioUi {
    style: Style,
}

impl StdioUi {
    pub fn new() -> Self {
        Self {
            style: Style::detect(),
        }
    }
}

impl Default for StdioUi {
    fn default() -> Self {
        Self::new()
    }
}

impl PaletteUi for StdioUi {
    fn choose(&mut self, rows: &[Vec<String>]) -> Option<usize> {
        if rows.is_empty() {
            println!("{}", paint(Role::Dim, "(no commands)", &self.style));
            return None;
        }
        println!("{}", paint(Role::Bold, "Select a command:", &self.style));
        for (i, row) in rows.iter().enumerate() {
            let name = row.first().map(String::as_str).unwrap_or("<unnamed>");
            let mut line = format!("  [{}] {}", i + 1, name);
            if row.len() > 1 {
                line.push_str("  ");
                line.push_str(&paint(Role::Dim, row[1..].join(" | "), &self.style));
            }
            println!("{line}");
        }
        print!("Enter number (1-{}): ", rows.len());
        let _ = io::stdout().flush();

        let mut line = String::new();
        match io::stdin().read_line(&mut line) {
            Ok(0) | Err(_) => return None,
            Ok(_) => {}
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return None;
        }
        if let Ok(idx) = trimmed.parse::<usize>() {
            return (1..=rows.len()).contains(&idx).then(|| idx - 1);
        }
        // Fallback: treat the input as a command name.
        rows.iter()
            .position(|row| row.first().is_some_and(|n| n.eq_ignore_ascii_case(trimmed)))
    }

    fn prompt_text(&mut self, label: &str, initial: &str) -> Option<String> {
        if initial.is_empty() {
            print!("{label} ");
        } else {
            print!("{label} [{initial}] ");
        }
        let _ = io::stdout().flush();

        let mut line = String::new();
        match io::stdin().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => {
                let text = line.trim_end_matches(['\n', '\r']);
                if text.is_empty() && !initial.is_empty() {
                    Some(initial.to_string())
                } else {
                    Some(text.to_string())
                }
            }
        }
    }

    fn show_error(&mut self, message: &str) {
        eprintln!(
            "{} {}",
            emoji("error", &self.style),
            paint(Role::Error, message, &self.style)
        );
    }
}

/* ---- Host Runner ---- */

/// Runs built-in commands directly; everything else becomes one JSON
/// invocation line on stdout for the embedding host.
pub struct HostRunner {
    registry: CommandRegistry,
}

impl HostRunner {
    pub fn new(registry: CommandRegistry) -> Self {
        Self { registry }
    }
}

impl CommandRunner for HostRunner {
    fn run_command(&mut self, name: &str, args: &Map<String, Value>) -> Result<()> {
        if let Some(result) = self.registry.dispatch(name, args) {
            log_debug!("dispatched '{name}' to built-in handler");
            return result;
        }
        log_debug!("forwarding '{name}' to the host invocation stream");
        emit_invocation(&mut io::stdout(), name, args)
    }
}

/// Write one invocation line: `{"command": name, "arguments": {...}}`.
pub fn emit_invocation<W: Write>(out: &mut W, name: &str, args: &Map<String, Value>) -> Result<()> {
    let line = serde_json::to_string(&json!({
        "command": name,
        "arguments": args,
    }))
    .context("Failed to encode invocation")?;
    writeln!(out, "{line}").context("Failed to write invocation line")?;
    Ok(())
}

/* ---- Built-in Commands ---- */

/// Prints a message to stdout, optionally repeated.
pub struct EchoCommand;

impl PaletteCommand for EchoCommand {
    fn signature(&self) -> Signature {
        Signature::new(vec![
            Param::required("message"),
            Param::optional("repeat", json!(1)),
        ])
    }

    fn doc(&self) -> Option<&str> {
        Some("Print a message to standard output.")
    }

    fn run(&mut self, args: &Map<String, Value>) -> Result<()> {
        let message = args
            .get("message")
            .and_then(Value::as_str)
            .ok_or_else(|| anyhow::anyhow!("echo needs a string 'message' argument"))?;
        let repeat = args.get("repeat").and_then(Value::as_u64).unwrap_or(1);
        for _ in 0..repeat {
            println!("{message}");
        }
        Ok(())
    }
}

/// Prints the cmdpal version.
pub struct VersionCommand;

impl PaletteCommand for VersionCommand {
    fn signature(&self) -> Signature {
        Signature::new(Vec::new())
    }

    fn doc(&self) -> Option<&str> {
        Some("Print the cmdpal version.")
    }

    fn run(&mut self, _args: &Map<String, Value>) -> Result<()> {
        println!("cmdpal {}", env!("CARGO_PKG_VERSION"));
        Ok(())
    }
}

/// Registry of commands this host implements natively.
///
/// Only the application family carries built-ins; document and window
/// commands always go out over the invocation stream.
pub fn builtin_registry(family: Family) -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    if matches!(family, Family::Application) {
        registry.register(EchoCommand);
        registry.register(VersionCommand);
    }
    registry
}

/* ---- Tests (basic) ---- */
