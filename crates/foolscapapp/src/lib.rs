//! # Foolscap Architecture
//!
//! Foolscap keeps plain-text notes and a metadata index describing them. This
//! crate is the **UI-agnostic core**; the `foolscap` binary is one client of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (foolscap crate)                                       │
//! │  - Argument parsing, editor launching, terminal output      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One module per user operation, returns `CmdResult`       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Metadata Store (store/meta_store.rs)                       │
//! │  - Components: create, re-sync, rename, remove, migrate     │
//! │  - Uses parser, fuzzy matcher, conflict resolver, hooks     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Backends (store/)                                  │
//! │  - FsBackend (production), MemBackend (testing)             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## No I/O Assumptions in Core
//!
//! Nothing in this crate writes to stdout/stderr or exits the process. Progress
//! and diagnostics go through the `log` facade; user-facing output is returned
//! as structured [`commands::CmdResult`] values.
//!
//! ## Module Overview
//!
//! - [`api`]: facade used by clients
//! - [`commands`]: business logic per operation
//! - [`store`]: metadata store and storage backends
//! - [`parser`]: note text format
//! - [`fuzzy`]: typo-tolerant name lookup
//! - [`conflict`]: unique name generation
//! - [`hooks`]: injectable notification, migration and macro behavior
//! - [`model`]: `Component` and the metadata index
//! - [`config`]: layered settings and storage paths
//! - [`error`]: error type

pub mod api;
pub mod commands;
pub mod config;
pub mod conflict;
pub mod error;
pub mod fuzzy;
pub mod hooks;
pub mod model;
pub mod parser;
pub mod store;
