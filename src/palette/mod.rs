/*!
Palette core: catalog building, argument parsing, reconciliation, dispatch.

Directory Layout:
  src/palette/
    mod.rs       (this file; declarations + re-exports)
    family.rs    (Family enum + per-family constants)
    error.rs     (PaletteError kinds)
    settings.rs  (PaletteSettings + settings file loading)
    catalog.rs   (CommandSpec, DeclaredCommand, build_catalog)
    registry.rs  (PaletteCommand trait + CommandRegistry)
    parse.rs     (argument text -> ParsedArgs)
    invoke.rs    (reconciler + chooser/prompt/dispatch flow)

Conventions:
  - Everything in here is synchronous and owns no global state; settings
    and registries are plain values threaded through by the caller.
  - The PaletteError kinds are the only error shapes crossing this module
    boundary; file and IO plumbing at the edges uses anyhow.
  - Catalogs are rebuilt per listing, never cached.

Re-exports cover the API the cmd/ layer relies on.
*/

pub mod catalog;
pub mod error;
pub mod family;
pub mod invoke;
pub mod parse;
pub mod registry;
pub mod settings;

pub use catalog::{CommandSpec, DeclaredCommand, build_catalog};
pub use error::PaletteError;
pub use family::Family;
pub use invoke::{CommandRunner, Outcome, PaletteUi, dispatch, merge_positional_args, run_palette};
pub use parse::{ParsedArgs, parse_arguments};
pub use registry::{CommandRegistry, PaletteCommand, Param, Signature, palette_name};
pub use settings::{PaletteSettings, load_settings};
