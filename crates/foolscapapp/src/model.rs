//! # Domain Model: Components and the Metadata Index
//!
//! Every note heading owns one [`Component`], the metadata record that lets
//! foolscap list, search and tag notes without reading every note file.
//! Components live in the [`MetaIndex`], keyed by the note name.
//!
//! ## Lifecycle
//!
//! ```text
//! absent ──new_component──▶ created (views = 1)
//!                              │
//!                              ├──update_component──▶ updated (views += 1, modified = now)
//!                              │
//!                              └──remove_component──▶ removed (terminal)
//! ```
//!
//! A name that is removed and later created again starts over at `views = 1`.
//!
//! ## Schema Evolution
//!
//! Every field carries a serde default, so an index written by an
//! older version still loads. Missing `book`/`num_sub` values are repaired by
//! the migration hook (see [`crate::hooks::SchemaMigrator`]).

use chrono::{DateTime, Utc};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Book assigned to components created without an explicit one.
pub const DEFAULT_BOOK: &str = "general";

/// The metadata index: component name → component.
///
/// A `BTreeMap` keeps key iteration deterministic, which the fuzzy matcher
/// relies on to break ties.
pub type MetaIndex = BTreeMap<String, Component>;

/// A nested section within a note body.
///
/// `start` and `end` are offsets within the note block, where offset 0 is the
/// opening delimiter line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubHeading {
    pub title: String,
    pub description: String,
    pub start: usize,
    pub end: usize,
}

impl SubHeading {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        start: usize,
        end: usize,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            start,
            end,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    #[serde(default = "epoch")]
    pub created: DateTime<Utc>,
    #[serde(default = "epoch")]
    pub modified: DateTime<Utc>,
    #[serde(default)]
    pub views: usize,
    #[serde(default)]
    pub length: usize,
    #[serde(default)]
    pub description: String,
    /// Equality ignores order; display keeps the order tags were written in.
    #[serde(default)]
    pub tags: IndexSet<String>,
    #[serde(default)]
    pub book: String,
    #[serde(default)]
    pub sub_headings: Vec<SubHeading>,
    #[serde(default)]
    pub num_sub: usize,
    #[serde(default)]
    pub vim_cmds: Vec<String>,
}

fn epoch() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
}

impl Default for Component {
    fn default() -> Self {
        Self {
            created: epoch(),
            modified: epoch(),
            views: 0,
            length: 0,
            description: String::new(),
            tags: IndexSet::new(),
            book: DEFAULT_BOOK.to_string(),
            sub_headings: Vec::new(),
            num_sub: 0,
            vim_cmds: Vec::new(),
        }
    }
}

impl Component {
    /// A freshly created component: one view, created and modified at `now`.
    pub fn created_at(now: DateTime<Utc>, book: &str) -> Self {
        Self {
            created: now,
            modified: now,
            views: 1,
            book: book.to_string(),
            ..Default::default()
        }
    }

    pub fn set_sub_headings(&mut self, sub_headings: Vec<SubHeading>) {
        self.num_sub = sub_headings.len();
        self.sub_headings = sub_headings;
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }
}
