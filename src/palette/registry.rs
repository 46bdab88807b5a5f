//! Registered command handlers.
//!
//! PaletteCommand -> trait a host command implements (signature + run)
//! CommandRegistry -> registration order list, palette names derived from
//! the handler's type name (strip `Command`, CamelCase -> snake_case)
//!
//! A signature declares the full parameter list of the handler, including
//! leading context parameters (such as the document handle for document
//! commands); the family's context skip strips those before the catalog
//! sees them.

use serde_json::{Map, Value};

use crate::palette::catalog::CommandSpec;
use crate::palette::error::PaletteError;

/* ---- Signature ---- */

/// One parameter of a command handler.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    /// `None` marks a required parameter.
    pub default: Option<Value>,
}

impl Param {
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: None,
        }
    }

    pub fn optional(name: impl Into<String>, default: Value) -> Self {
        Self {
            name: name.into(),
            default: Some(default),
        }
    }
}

/// Declared invocation shape of a command handler, in parameter order.
#[derive(Debug, Clone, PartialEq)]
pub struct Signature {
    pub params: Vec<Param>,
    pub accepts_extra_args: bool,
}

impl Signature {
    pub fn new(params: Vec<Param>) -> Self {
        Self {
            params,
            accepts_extra_args: false,
        }
    }

    /// Mark the command as taking arbitrary extra named arguments.
    pub fn with_extra_args(mut self) -> Self {
        self.accepts_extra_args = true;
        self
    }
}

/* ---- Command trait ---- */

/// A host command that can be listed in the palette and invoked with a
/// named-argument map.
pub trait PaletteCommand {
    /// Full invocation signature, context parameters included.
    fn signature(&self) -> Signature;

    /// Documentation; the first line ends up in the chooser.
    fn doc(&self) -> Option<&str> {
        None
    }

    /// Invoke the command with reconciled named arguments.
    fn run(&mut self, args: &Map<String, Value>) -> anyhow::Result<()>;
}

/* ---- Registry ---- */

struct RegisteredCommand {
    name: String,
    handler: Box<dyn PaletteCommand>,
}

impl RegisteredCommand {
    /// Derive the catalog entry, stripping the family's leading context
    /// parameters and splitting the rest into required / optional.
    fn spec(&self, context_skip: usize) -> Result<CommandSpec, PaletteError> {
        let sig = self.handler.signature();
        let mut required = Vec::new();
        let mut optional = Vec::new();
        for param in sig.params.into_iter().skip(context_skip) {
            match param.default {
                Some(default) => optional.push((param.name, default)),
                None => {
                    if !optional.is_empty() {
                        return Err(PaletteError::schema(format!(
                            "command '{}': required parameter '{}' follows an optional one",
                            self.name, param.name
                        )));
                    }
                    required.push(param.name);
                }
            }
        }
        CommandSpec::new(
            self.name.clone(),
            required,
            optional,
            self.handler.doc().map(str::to_string),
            sig.accepts_extra_args,
        )
    }
}

/// Commands registered by the host, in registration order.
///
/// Names are not required to be unique; the catalog lists every entry and
/// dispatch goes to the first registration of a name.
#[derive(Default)]
pub struct CommandRegistry {
    commands: Vec<RegisteredCommand>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler under the palette name derived from its type.
    pub fn register<C: PaletteCommand + 'static>(&mut self, command: C) {
        let type_name = short_type_name(std::any::type_name::<C>());
        self.commands.push(RegisteredCommand {
            name: palette_name(type_name),
            handler: Box::new(command),
        });
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.iter().any(|c| c.name == name)
    }

    /// Catalog entries for every registered command.
    ///
    /// A malformed signature aborts the whole listing.
    pub fn specs(&self, context_skip: usize) -> Result<Vec<CommandSpec>, PaletteError> {
        self.commands
            .iter()
            .map(|c| c.spec(context_skip))
            .collect()
    }

    /// Run the first registered handler with this name.
    ///
    /// `None` means the name is not registered here and the caller should
    /// hand the invocation to the host instead.
    pub fn dispatch(
        &mut self,
        name: &str,
        args: &Map<String, Value>,
    ) -> Option<anyhow::Result<()>> {
        let cmd = self.commands.iter_mut().find(|c| c.name == name)?;
        Some(cmd.handler.run(args))
    }
}

/* ---- Name derivation ---- */

/// Last path segment of a fully qualified type name, generics dropped.
fn short_type_name(full: &str) -> &str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

/// Palette name for a handler type name.
///
/// Strips a trailing `Command` (kept when the whole name is `Command`),
/// then lowercases with `_` inserted at each lower-to-upper boundary:
/// `ShowPanelCommand` -> `show_panel`.
pub fn palette_name(type_name: &str) -> String {
    const SUFFIX: &str = "Command";
    let mut base = type_name;
    if let Some(stripped) = base.strip_suffix(SUFFIX)
        && !stripped.is_empty()
    {
        base = stripped;
    }
    let mut name = String::with_capacity(base.len() + 4);
    let mut prev_lower = false;
    for ch in base.chars() {
        if prev_lower && ch.is_ascii_uppercase() {
            name.push('_');
        }
        prev_lower = ch.is_ascii_lowercase();
        name.push(ch.to_ascii_lowercase());
    }
    name
}

/* --------------------------------- Tests ---------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;
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

        fn doc(&self) -> Option<&str> {
            Some("Move the caret.")
        }

        fn run(&mut self, _args: &Map<String, Value>) -> anyhow::Result<()> {
            Ok(())
        }
    }

    struct EchoCommand;

    impl PaletteCommand for EchoCommand {
        fn signature(&self) -> Signature {
            Signature::new(vec![Param::required("message")])
        }

        fn run(&mut self, args: &Map<String, Value>) -> anyhow::Result<()> {
            if args.contains_key("message") {
                Ok(())
            } else {
                anyhow::bail!("missing message")
            }
        }
    }

    struct BrokenCommand;

    impl PaletteCommand for BrokenCommand {
        fn signature(&self) -> Signature {
            Signature::new(vec![
                Param::optional("mode", json!("fast")),
                Param::required("path"),
            ])
        }

        fn run(&mut self, _args: &Map<String, Value>) -> anyhow::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn palette_names_strip_suffix_and_snake_case() {
        assert_eq!(palette_name("MoveCommand"), "move");
        assert_eq!(palette_name("ShowPanelCommand"), "show_panel");
        assert_eq!(palette_name("SomeName"), "some_name");
        assert_eq!(palette_name("HTTPGet"), "httpget");
        assert_eq!(palette_name("Utf8Encode"), "utf8encode");
    }

    #[test]
    fn bare_command_name_is_not_stripped_to_nothing() {
        assert_eq!(palette_name("Command"), "command");
    }

    #[test]
    fn short_type_name_takes_last_segment() {
        assert_eq!(short_type_name("crate_x::cmd::MoveCommand"), "MoveCommand");
        assert_eq!(short_type_name("MoveCommand"), "MoveCommand");
        assert_eq!(
            short_type_name("alloc::vec::Vec<core::option::Option<u8>>"),
            "Vec"
        );
    }

    #[test]
    fn context_skip_strips_leading_parameters() {
        let mut registry = CommandRegistry::new();
        registry.register(MoveCommand);

        let specs = registry.specs(1).unwrap();
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].name, "move");
        assert_eq!(specs[0].required, vec!["by"]);
        assert_eq!(specs[0].optional, vec![("extend".to_string(), json!(false))]);
        assert_eq!(specs[0].doc.as_deref(), Some("Move the caret."));
    }

    #[test]
    fn zero_skip_keeps_every_parameter() {
        let mut registry = CommandRegistry::new();
        registry.register(MoveCommand);

        let specs = registry.specs(0).unwrap();
        assert_eq!(specs[0].required, vec!["view", "by"]);
    }

    #[test]
    fn required_after_optional_signature_is_a_schema_error() {
        let mut registry = CommandRegistry::new();
        registry.register(BrokenCommand);

        let err = registry.specs(0).unwrap_err();
        assert!(matches!(err, PaletteError::Schema { .. }));
        assert!(err.to_string().contains("path"));
    }

    #[test]
    fn dispatch_routes_to_registered_handler() {
        let mut registry = CommandRegistry::new();
        registry.register(EchoCommand);
        assert!(registry.contains("echo"));

        let mut args = Map::new();
        args.insert("message".to_string(), json!("hi"));
        let outcome = registry.dispatch("echo", &args);
        assert!(matches!(outcome, Some(Ok(()))));

        let outcome = registry.dispatch("echo", &Map::new());
        match outcome {
            Some(Err(err)) => assert!(err.to_string().contains("missing message")),
            other => panic!("expected handler error, got {other:?}"),
        }
    }

    #[test]
    fn dispatch_ignores_unknown_names() {
        let mut registry = CommandRegistry::new();
        registry.register(EchoCommand);
        assert!(registry.dispatch("unknown", &Map::new()).is_none());
    }

    #[test]
    fn duplicate_names_are_listed_but_first_wins_dispatch() {
        struct Probe(&'static str);
        impl PaletteCommand for Probe {
            fn signature(&self) -> Signature {
                Signature::new(Vec::new())
            }
            fn run(&mut self, _args: &Map<String, Value>) -> anyhow::Result<()> {
                anyhow::bail!(self.0)
            }
        }

        let mut registry = CommandRegistry::new();
        registry.register(Probe("first"));
        registry.register(Probe("second"));

        assert_eq!(registry.specs(0).unwrap().len(), 2);
        match registry.dispatch("probe", &Map::new()) {
            Some(Err(err)) => assert!(err.to_string().contains("first")),
            other => panic!("expected first handler, got {other:?}"),
        }
    }

    #[test]
    fn extra_args_flag_survives_spec_derivation() {
        struct RunMacroCommand;
        impl PaletteCommand for RunMacroCommand {
            fn signature(&self) -> Signature {
                Signature::new(vec![Param::required("name")]).with_extra_args()
            }
            fn run(&mut self, _args: &Map<String, Value>) -> anyhow::Result<()> {
                Ok(())
            }
        }

        let mut registry = CommandRegistry::new();
        registry.register(RunMacroCommand);
        let specs = registry.specs(0).unwrap();
        assert_eq!(specs[0].name, "run_macro");
        assert!(specs[0].accepts_extra_args);
    }
}
