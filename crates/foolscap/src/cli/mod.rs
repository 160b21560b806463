//! # CLI Behavior
//!
//! One possible client for foolscap. It is the only place that knows about
//! terminal I/O, the editor process and exit codes.
//!
//! ## Editing Flow
//!
//! `foolscap edit <name>` resolves the name (exact, then closest match), opens
//! the note in `$EDITOR` (falling back to `$VISUAL`, then `vim`) with the
//! note's vim commands passed as `-c "<cmds>"`, and re-syncs the note once the
//! editor exits. Renames done by editing the heading are reported.
//!
//! `foolscap new` without a file opens a template draft in the editor and
//! creates every note block found in it.
//!
//! ## Module Structure
//!
//! - `setup`: argument parsing via clap
//! - `commands`: logger setup and dispatch to the API
//! - `editor`: editor discovery and launching
//! - `print`: colored terminal output

mod commands;
mod editor;
mod print;
pub mod setup;

pub use commands::run;
