//! # Storage Layer
//!
//! Foolscap keeps two kinds of state:
//! 1. **Note text**: one plain-text file per note, named after the note.
//! 2. **Metadata index**: a JSON map from note name to [`Component`](crate::model::Component).
//!
//! The index is a cache over the note text. Whenever a note is saved after an
//! edit, its component is re-derived from the text, so the two converge.
//!
//! ## Layers
//!
//! - [`backend::StorageBackend`]: raw I/O (the "how").
//!   - [`fs_backend::FsBackend`]: production, files under the configured root.
//!   - [`mem_backend::MemBackend`]: in-memory, for tests.
//! - [`meta_store::MetaStore`]: the component logic (the "what"): creation,
//!   re-sync after edits, renames, conflict resolution and fuzzy lookups.
//!
//! ## Load / Mutate / Save
//!
//! Every public store operation loads the whole index, changes it and writes it
//! back before returning. There is no locking: the CLI runs one command per
//! process, which serializes access in practice.
//!
//! ## Failure Policy
//!
//! - An unreadable index (corrupt JSON, permissions) is treated as empty.
//! - A write failure is always returned to the caller.
//! - Index writes go through a temp file and a rename, so a crash never leaves
//!   a half-written index behind.

pub mod backend;
pub mod fs_backend;
pub mod mem_backend;
pub mod meta_store;

pub use meta_store::{format_cmds, MetaStore};
