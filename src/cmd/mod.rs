/*!
CLI subcommand modules.

Directory Layout:
  src/cmd/
    mod.rs          (this file: module declarations + re-exports)
    list.rs         (ListArgs + execute_list: catalog table / JSON)
    show.rs         (ShowArgs + execute_show: single-command detail)
    run.rs          (RunArgs  + execute_run: argument text -> dispatch)
    host.rs         (stdio UI, host runner, built-in commands)
    shared.rs       (settings resolution, catalog assembly, error output)
    format.rs       (terminal styling: banner / table / color helpers)

Re-exports (public API expected by main.rs):
  - ListArgs, execute_list
  - ShowArgs, execute_show
  - RunArgs,  execute_run

Conventions:
  - Each subcommand module exposes exactly one public `execute_*` function
    that returns `anyhow::Result<()>`.
  - Argument structs derive `clap::Args` and are kept minimal. Every
    subcommand takes `-c/--config` directly (with a CMDPAL_CONFIG env
    fallback) so invocations stay copy-pasteable.
  - Shared runtime helpers (settings loading, family catalog assembly)
    live in `shared.rs` and are reused across subcommands.
*/

pub mod format;
pub mod host;
pub mod list;
pub mod run;
pub mod shared;
pub mod show;

pub use list::{ListArgs, execute_list};
pub use run::{RunArgs, execute_run};
pub use show::{ShowArgs, execute_show};
