/*!
Command family enum shared by the core and the CLI.

Variants:
  document    (commands bound to a per-document context)
  window      (commands bound to a per-window context)
  application (commands bound to the global application context)

The three families expose the same pipeline; they differ only in which
settings key supplies their declared commands and in how many implicit
leading context parameters a registered signature carries.

Helpers:
  - variants()
  - from_str_ci()
  - settings_key()
  - context_skip()
*/

use std::fmt;

/// Enumeration of the context scopes commands are registered under.
#[derive(clap::ValueEnum, Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Family {
    /// Commands that operate on a single document
    Document,
    /// Commands that operate on a window
    Window,
    /// Commands that operate on the application as a whole
    Application,
}

impl Family {
    /// Return a static slice of all variants (order matters for help display).
    pub const fn variants() -> &'static [Family] {
        &[Family::Document, Family::Window, Family::Application]
    }

    /// Case-insensitive parser not relying on `clap`, for internal conversions.
    pub fn from_str_ci(s: &str) -> Option<Self> {
        let norm = s.trim().to_ascii_lowercase();
        match norm.as_str() {
            "document" => Some(Family::Document),
            "window" => Some(Family::Window),
            "application" => Some(Family::Application),
            _ => None,
        }
    }

    /// Settings key holding this family's declared commands.
    pub const fn settings_key(&self) -> &'static str {
        match self {
            Family::Document => "document_commands",
            Family::Window => "window_commands",
            Family::Application => "application_commands",
        }
    }

    /// Number of implicit leading context parameters in a registered
    /// signature. Document commands receive the document handle first;
    /// window and application commands declare user-facing parameters only.
    pub const fn context_skip(&self) -> usize {
        match self {
            Family::Document => 1,
            Family::Window => 0,
            Family::Application => 0,
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Family::Document => "document",
            Family::Window => "window",
            Family::Application => "application",
        };
        f.write_str(s)
    }
}

/* --------------------------------- Tests ---------------------------------- */
