//! Command catalog.
//!
//! CommandSpec -> one palette entry (name, argument shape, doc)
//! DeclaredCommand -> config-declared entry, validated into a CommandSpec
//! build_catalog -> registered + declared entries, stable-sorted by name
//!
//! The catalog is rebuilt from scratch for every listing; nothing here is
//! cached between invocations.

use std::collections::HashSet;

use serde::Deserialize;
use serde_json::Value;

use crate::palette::error::PaletteError;
use crate::palette::settings::PaletteSettings;

/// A single palette entry in normalized form.
///
/// `required` and `optional` keep declaration order; the reconciler walks
/// them in exactly this order when it assigns positional values.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandSpec {
    pub name: String,
    pub required: Vec<String>,
    pub optional: Vec<(String, Value)>,
    pub doc: Option<String>,
    pub accepts_extra_args: bool,
}

impl CommandSpec {
    /// Build a spec, rejecting empty names and duplicate argument names.
    pub fn new(
        name: impl Into<String>,
        required: Vec<String>,
        optional: Vec<(String, Value)>,
        doc: Option<String>,
        accepts_extra_args: bool,
    ) -> Result<Self, PaletteError> {
        let name = name.into();
        if name.is_empty() {
            return Err(PaletteError::schema("command name must not be empty"));
        }
        let mut seen = HashSet::new();
        for arg in required.iter().chain(optional.iter().map(|(n, _)| n)) {
            if !seen.insert(arg.as_str()) {
                return Err(PaletteError::schema(format!(
                    "duplicate argument name '{arg}' in command '{name}'"
                )));
            }
        }
        Ok(Self {
            name,
            required,
            optional,
            doc,
            accepts_extra_args,
        })
    }

    /// All argument names in assignment order: required first, then optional.
    pub fn argument_names(&self) -> impl Iterator<Item = &str> {
        self.required
            .iter()
            .map(String::as_str)
            .chain(self.optional.iter().map(|(name, _)| name.as_str()))
    }

    /// True when invoking this command can take any argument at all.
    pub fn has_any_args(&self) -> bool {
        !self.required.is_empty() || !self.optional.is_empty() || self.accepts_extra_args
    }

    /// Render the argument shape as `req1, req2, opt=default, ...`.
    ///
    /// Boring defaults (null, false, zero, empty string/array/object) are
    /// elided down to the bare name unless `show_boring_defaults` is set.
    pub fn format_arguments(&self, show_boring_defaults: bool) -> String {
        let mut parts: Vec<String> = self.required.clone();
        for (name, default) in &self.optional {
            if show_boring_defaults || !is_boring(default) {
                parts.push(format!("{name}={default}"));
            } else {
                parts.push(name.clone());
            }
        }
        if self.accepts_extra_args {
            parts.push("...".to_string());
        }
        parts.join(", ")
    }

    /// Rows shown in the chooser: name, then optionally the argument shape
    /// (or a placeholder), then optionally the first doc line.
    pub fn description(&self, settings: &PaletteSettings) -> Vec<String> {
        let mut desc = vec![self.name.clone()];
        if settings.show_arguments {
            if self.has_any_args() {
                desc.push(self.format_arguments(settings.show_boring_defaults));
            } else {
                desc.push("No arguments".to_string());
            }
        }
        if settings.show_doc
            && let Some(doc) = &self.doc
            && let Some(summary) = doc.trim().lines().next()
        {
            desc.push(summary.to_string());
        }
        desc
    }
}

/// A command declared in the settings file.
///
/// `args` mixes bare names (required arguments) with `[name, default]`
/// pairs (optional arguments); the mix is validated in [`Self::to_spec`]
/// rather than at deserialization time so the error can name the command.
#[derive(Debug, Clone, Deserialize)]
pub struct DeclaredCommand {
    pub name: String,
    #[serde(default)]
    pub args: Vec<Value>,
    #[serde(default)]
    pub doc: Option<String>,
    #[serde(default)]
    pub has_arbitrary_args: bool,
}

impl DeclaredCommand {
    /// Validate the raw argument list into a [`CommandSpec`].
    pub fn to_spec(&self) -> Result<CommandSpec, PaletteError> {
        let mut required = Vec::new();
        let mut optional: Vec<(String, Value)> = Vec::new();
        for arg in &self.args {
            match arg {
                Value::Array(pair) => {
                    let [name, default] = pair.as_slice() else {
                        return Err(PaletteError::schema(format!(
                            "command '{}': an optional argument needs exactly a name and a default value",
                            self.name
                        )));
                    };
                    let Some(name) = name.as_str() else {
                        return Err(PaletteError::schema(format!(
                            "command '{}': optional argument name must be a string",
                            self.name
                        )));
                    };
                    optional.push((name.to_string(), default.clone()));
                }
                Value::String(name) => {
                    if !optional.is_empty() {
                        return Err(PaletteError::schema(format!(
                            "command '{}': required arguments cannot follow optional ones",
                            self.name
                        )));
                    }
                    required.push(name.clone());
                }
                other => {
                    return Err(PaletteError::schema(format!(
                        "command '{}': argument entries must be a name or a [name, default] pair, got {other}",
                        self.name
                    )));
                }
            }
        }
        CommandSpec::new(
            self.name.clone(),
            required,
            optional,
            self.doc.clone(),
            self.has_arbitrary_args,
        )
    }
}

/// Assemble the catalog shown to the user.
///
/// Registered commands come first, then config-declared ones; the stable
/// sort keeps that relative order for entries sharing a name. A single
/// malformed declaration aborts the whole build.
pub fn build_catalog(
    registered: Vec<CommandSpec>,
    declared: &[DeclaredCommand],
) -> Result<Vec<CommandSpec>, PaletteError> {
    let mut commands = registered;
    for decl in declared {
        commands.push(decl.to_spec()?);
    }
    commands.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(commands)
}

/// A default nobody needs to see: null, false, zero, or an empty
/// string/array/object.
fn is_boring(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/* --------------------------------- Tests ---------------------------------- */
