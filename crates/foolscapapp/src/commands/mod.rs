//! # Command Layer
//!
//! Each user operation lives in its own submodule as a plain function over a
//! [`MetaStore`](crate::store::MetaStore). Commands never print: they return a
//! [`CmdResult`] and leave rendering to the client.
//!
//! ## Structured Returns
//!
//! [`CmdResult`] carries:
//! - `affected_notes`: names created, saved or deleted
//! - `listed_notes`: components to display, paired with their names
//! - `note_paths`: note files (for the editor launcher)
//! - `contents`: note text (for `view`)
//! - `editor_cmds`: the joined vim commands for `edit`
//! - `tag_counts`: tag usage (for `tags`)
//! - `messages`: leveled messages
//!
//! ## Testing
//!
//! Command tests run against `MemBackend` and cover the logic branches; the
//! store's own behavior is tested in `store::meta_store`.
//!
//! ## Command Modules
//!
//! - [`new`]: create notes from a draft
//! - [`save`]: re-sync a note after an edit
//! - [`view`]: note text
//! - [`edit`]: note path and editor commands
//! - [`delete`]: remove a note into the recycle bin
//! - [`list`]: components, filtered by tag/book
//! - [`search`]: substring search over names, descriptions and tags
//! - [`tags`]: tag usage counts
//! - [`upgrade`]: migrate the index to the current schema
//! - [`helpers`]: shared name resolution

use crate::model::Component;
use serde::Serialize;
use std::path::PathBuf;

pub mod delete;
pub mod edit;
pub mod helpers;
pub mod list;
pub mod new;
pub mod save;
pub mod search;
pub mod tags;
pub mod upgrade;
pub mod view;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// A component paired with its index key, for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListedNote {
    pub name: String,
    pub component: Component,
}

impl ListedNote {
    pub fn new(name: impl Into<String>, component: Component) -> Self {
        Self {
            name: name.into(),
            component,
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_notes: Vec<String>,
    pub listed_notes: Vec<ListedNote>,
    pub note_paths: Vec<PathBuf>,
    pub contents: Vec<String>,
    pub editor_cmds: Option<String>,
    pub tag_counts: Vec<(String, usize)>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_notes(mut self, names: Vec<String>) -> Self {
        self.affected_notes = names;
        self
    }

    pub fn with_listed_notes(mut self, notes: Vec<ListedNote>) -> Self {
        self.listed_notes = notes;
        self
    }

    pub fn with_note_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.note_paths = paths;
        self
    }
}
