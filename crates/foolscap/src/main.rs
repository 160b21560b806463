//! # Foolscap CLI
//!
//! The binary is intentionally thin: the CLI lives in `src/cli/`, and this file
//! only invokes `cli::run()` and handles process termination.
//!
//! ## Workspace Structure
//!
//! - `crates/foolscapapp/`: UI-agnostic library (parser, metadata store, commands)
//! - `crates/foolscap/`: this CLI client
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/foolscap/src/cli/)                       │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Dispatch and logger setup (commands.rs)                  │
//! │  - Editor launching (editor.rs)                             │
//! │  - Terminal output (print.rs)                               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (crates/foolscapapp/src/api.rs)                  │
//! │  - Dispatches to command modules, returns `CmdResult`       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything from the API inward is UI agnostic. The CLI owns argument
//! parsing, the editor process, rendering and exit codes.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
