//! Error kinds for the palette core.
//!
//! PaletteError -> Schema | Syntax | Conflict | Overflow | Dispatch
//! Schema failures abort a whole catalog build; Syntax/Conflict/Overflow
//! abort a single invocation attempt (the user may retry); Dispatch is
//! shown to the user and still propagated so the caller can log it.

use thiserror::Error;

/// Failures raised by catalog building, argument parsing, reconciliation,
/// and dispatch.
#[derive(Debug, Error)]
pub enum PaletteError {
    /// A static command declaration or registered signature is malformed.
    #[error("invalid command declaration: {message}")]
    Schema { message: String },

    /// The argument text does not match the argument grammar.
    #[error("invalid arguments: {message}")]
    Syntax { message: String },

    /// A positional value collides with an explicit named value.
    #[error("repeated value for argument \"{name}\"")]
    Conflict { name: String },

    /// More positional values than declared parameters.
    #[error("too many positional arguments (command declares {declared})")]
    Overflow { declared: usize },

    /// The command runner itself failed.
    #[error("command '{name}' caused an error: {message}")]
    Dispatch { name: String, message: String },
}

impl PaletteError {
    /// Shorthand used by the catalog / registry builders.
    pub fn schema(message: impl Into<String>) -> Self {
        PaletteError::Schema {
            message: message.into(),
        }
    }

    /// Shorthand used by the argument parser.
    pub fn syntax(message: impl Into<String>) -> Self {
        PaletteError::Syntax {
            message: message.into(),
        }
    }

    /// True for faults in user-typed argument text (syntax, conflicts,
    /// overflow). These end one invocation attempt but are not fatal to
    /// the process; schema and dispatch failures are handled separately.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            PaletteError::Syntax { .. }
                | PaletteError::Conflict { .. }
                | PaletteError::Overflow { .. }
        )
    }
}

/* --------------------------------- Tests ---------------------------------- */

#[cfg(test)]
mod tests {
    use super::PaletteError;

    #[test]
    fn display_mentions_argument_name_on_conflict() {
        let err = PaletteError::Conflict { name: "by".into() };
        assert_eq!(err.to_string(), "repeated value for argument \"by\"");
    }

    #[test]
    fn display_mentions_command_on_dispatch() {
        let err = PaletteError::Dispatch {
            name: "move".into(),
            message: "no such buffer".into(),
        };
        assert!(err.to_string().contains("'move'"));
        assert!(err.to_string().contains("no such buffer"));
    }

    #[test]
    fn input_error_classification() {
        assert!(PaletteError::syntax("x").is_input_error());
        assert!(PaletteError::Conflict { name: "a".into() }.is_input_error());
        assert!(PaletteError::Overflow { declared: 2 }.is_input_error());
        assert!(!PaletteError::schema("x").is_input_error());
        assert!(
            !PaletteError::Dispatch {
                name: "x".into(),
                message: "y".into()
            }
            .is_input_error()
        );
    }
}
