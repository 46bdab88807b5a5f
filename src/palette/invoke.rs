//! Invocation flow: choose, prompt, reconcile, dispatch.
//!
//! merge_positional_args -> fold positional values into the named map
//! dispatch -> hand the named map to the host, wrapping failures
//! run_palette -> the full chooser/prompt loop over a built catalog
//!
//! The UI and the host sit behind traits so the same flow drives the
//! stdio front-end and the tests.

use serde_json::{Map, Value};

use crate::palette::catalog::CommandSpec;
use crate::palette::error::PaletteError;
use crate::palette::parse::{ParsedArgs, parse_arguments};
use crate::palette::settings::PaletteSettings;

/* ---- Seams ---- */

/// Chooser and prompt surface of the host.
///
/// `None` from either method means the user backed out; an index returned
/// by [`Self::choose`] refers into the `rows` slice it was shown.
pub trait PaletteUi {
    fn choose(&mut self, rows: &[Vec<String>]) -> Option<usize>;
    fn prompt_text(&mut self, label: &str, initial: &str) -> Option<String>;
    fn show_error(&mut self, message: &str);
}

/// Executes a command by name on behalf of the user.
pub trait CommandRunner {
    fn run_command(&mut self, name: &str, args: &Map<String, Value>) -> anyhow::Result<()>;
}

/* ---- Reconciliation ---- */

/// Assign positional values to argument names, required first, then
/// optional, in declaration order.
///
/// A positional landing on a name that was also given explicitly is a
/// [`PaletteError::Conflict`]; positionals left over after every name has
/// one are a [`PaletteError::Overflow`]. Extra named arguments pass
/// through untouched, whether or not the command declares them.
pub fn merge_positional_args(
    spec: &CommandSpec,
    parsed: ParsedArgs,
) -> Result<Map<String, Value>, PaletteError> {
    let ParsedArgs { positional, mut named } = parsed;
    let mut positional = positional.into_iter();
    for (name, value) in spec.argument_names().zip(positional.by_ref()) {
        if named.contains_key(name) {
            return Err(PaletteError::Conflict {
                name: name.to_string(),
            });
        }
        named.insert(name.to_string(), value);
    }
    if positional.next().is_some() {
        return Err(PaletteError::Overflow {
            declared: spec.required.len() + spec.optional.len(),
        });
    }
    Ok(named)
}

/* ---- Dispatch ---- */

/// Run the command, converting any host failure into a
/// [`PaletteError::Dispatch`] that names the command.
pub fn dispatch(
    runner: &mut dyn CommandRunner,
    name: &str,
    args: &Map<String, Value>,
) -> Result<(), PaletteError> {
    runner
        .run_command(name, args)
        .map_err(|err| PaletteError::Dispatch {
            name: name.to_string(),
            message: format!("{err:#}"),
        })
}

/* ---- Interactive flow ---- */

/// How one pass through the palette ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The user backed out of the chooser or the prompt.
    Cancelled,
    /// Bad input was shown to the user; nothing was dispatched.
    Aborted,
    /// The named command was dispatched.
    Ran(String),
}

/// Drive one palette round: show the catalog, prompt for arguments when
/// the chosen command takes any, reconcile, dispatch.
///
/// Input mistakes (syntax, conflicts, overflow) are shown to the user and
/// end the round as [`Outcome::Aborted`]; a dispatch failure is shown and
/// also returned so the caller can log it.
pub fn run_palette(
    catalog: &[CommandSpec],
    settings: &PaletteSettings,
    ui: &mut dyn PaletteUi,
    runner: &mut dyn CommandRunner,
) -> Result<Outcome, PaletteError> {
    let rows: Vec<Vec<String>> = catalog.iter().map(|c| c.description(settings)).collect();
    let Some(index) = ui.choose(&rows) else {
        return Ok(Outcome::Cancelled);
    };
    let Some(spec) = catalog.get(index) else {
        return Ok(Outcome::Cancelled);
    };

    let args = if spec.has_any_args() {
        let label = format!("{}:", spec.format_arguments(settings.show_boring_defaults));
        let Some(text) = ui.prompt_text(&label, "") else {
            return Ok(Outcome::Cancelled);
        };
        match parse_arguments(&text).and_then(|parsed| merge_positional_args(spec, parsed)) {
            Ok(merged) => merged,
            Err(err) if err.is_input_error() => {
                ui.show_error(&err.to_string());
                return Ok(Outcome::Aborted);
            }
            Err(err) => return Err(err),
        }
    } else {
        Map::new()
    };

    match dispatch(runner, &spec.name, &args) {
        Ok(()) => Ok(Outcome::Ran(spec.name.clone())),
        Err(err) => {
            ui.show_error(&err.to_string());
            Err(err)
        }
    }
}

/* --------------------------------- Tests ---------------------------------- */
