//! # Capability Hooks
//!
//! The metadata store calls out to three collaborators whose behavior is not
//! its concern. Each is a trait injected into [`crate::store::MetaStore`], so
//! tests can substitute recording or failing versions:
//!
//! - [`NotificationSink`]: told about tag changes when a note is re-synced.
//! - [`Migrator`]: brings a persisted index up to the current schema.
//! - [`MacroResolver`]: derives the editor commands stored in `vim_cmds`.
//!
//! The defaults are [`LogNotifier`], [`SchemaMigrator`] and [`DirectiveMacros`].

use crate::config::FoolscapConfig;
use crate::error::{FoolscapError, Result};
use crate::parser::note_directives;
use crate::store::backend::StorageBackend;
use indexmap::IndexSet;
use log::info;

/// Directive key that assigns a component to a book instead of producing a command.
pub const BOOK_DIRECTIVE: &str = "book";

pub trait NotificationSink {
    /// Called with the tags a note has now and the tags it had before.
    fn diff_tags(&self, new_tags: &IndexSet<String>, old_tags: &IndexSet<String>, name: &str);
}

pub trait Migrator {
    /// Rewrites the persisted index in the current schema.
    fn migrate_meta(&self, backend: &dyn StorageBackend, config: &FoolscapConfig) -> Result<()>;
}

pub trait MacroResolver {
    /// Editor commands for a note, `None` when the note asks for none.
    fn get_macro(&self, name: &str, block: &[String]) -> Option<Vec<String>>;
}

/// Logs added and removed tags.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl NotificationSink for LogNotifier {
    fn diff_tags(&self, new_tags: &IndexSet<String>, old_tags: &IndexSet<String>, name: &str) {
        let added: Vec<&str> = new_tags.difference(old_tags).map(String::as_str).collect();
        let removed: Vec<&str> = old_tags.difference(new_tags).map(String::as_str).collect();
        if !added.is_empty() {
            info!("{}: tags added: {}", name, added.join(", "));
        }
        if !removed.is_empty() {
            info!("{}: tags removed: {}", name, removed.join(", "));
        }
    }
}

/// Backs up the index, reloads it with schema defaults and repairs derived fields.
#[derive(Debug, Default, Clone, Copy)]
pub struct SchemaMigrator;

impl Migrator for SchemaMigrator {
    fn migrate_meta(&self, backend: &dyn StorageBackend, config: &FoolscapConfig) -> Result<()> {
        backend
            .backup_index()
            .map_err(|e| FoolscapError::Migration(format!("backup failed: {}", e)))?;
        let mut index = backend
            .load_index()
            .map_err(|e| FoolscapError::Migration(format!("index unreadable: {}", e)))?;

        let mut repaired = 0;
        for component in index.values_mut() {
            let before = component.clone();
            if component.book.trim().is_empty() {
                component.book = config.default_book.clone();
            }
            component.num_sub = component.sub_headings.len();
            if component.modified < component.created {
                component.modified = component.created;
            }
            if *component != before {
                repaired += 1;
            }
        }

        backend.save_index(&index)?;
        info!(
            "Migrated {} components ({} repaired)",
            index.len(),
            repaired
        );
        Ok(())
    }
}

/// Turns `{key:value}` directives into `set key=value` commands.
#[derive(Debug, Default, Clone, Copy)]
pub struct DirectiveMacros;

impl MacroResolver for DirectiveMacros {
    fn get_macro(&self, _name: &str, block: &[String]) -> Option<Vec<String>> {
        let cmds: Vec<String> = note_directives(block)
            .into_iter()
            .filter(|(key, _)| key != BOOK_DIRECTIVE)
            .map(|(key, value)| format!("set {}={}", key, value))
            .collect();
        if cmds.is_empty() {
            None
        } else {
            Some(cmds)
        }
    }
}

#[cfg(any(test, feature = "test_utils"))]
pub mod recording {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// One recorded `diff_tags` call: (new tags, old tags, note name).
    pub type TagDiff = (Vec<String>, Vec<String>, String);

    /// Notification sink that remembers every call. Clones share the log.
    #[derive(Debug, Default, Clone)]
    pub struct RecordingNotifier {
        calls: Rc<RefCell<Vec<TagDiff>>>,
    }

    impl RecordingNotifier {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn calls(&self) -> Vec<TagDiff> {
            self.calls.borrow().clone()
        }
    }

    impl NotificationSink for RecordingNotifier {
        fn diff_tags(&self, new_tags: &IndexSet<String>, old_tags: &IndexSet<String>, name: &str) {
            self.calls.borrow_mut().push((
                new_tags.iter().cloned().collect(),
                old_tags.iter().cloned().collect(),
                name.to_string(),
            ));
        }
    }

    /// Migrator that counts invocations and optionally fails.
    #[derive(Debug, Default, Clone)]
    pub struct CountingMigrator {
        runs: Rc<RefCell<usize>>,
        fail: bool,
    }

    impl CountingMigrator {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        pub fn runs(&self) -> usize {
            *self.runs.borrow()
        }
    }

    impl Migrator for CountingMigrator {
        fn migrate_meta(&self, _: &dyn StorageBackend, _: &FoolscapConfig) -> Result<()> {
            *self.runs.borrow_mut() += 1;
            if self.fail {
                return Err(FoolscapError::Migration("simulated failure".to_string()));
            }
            Ok(())
        }
    }
}
