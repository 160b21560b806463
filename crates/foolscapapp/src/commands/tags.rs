//! Tag usage across all components.

use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::backend::StorageBackend;
use crate::store::MetaStore;
use std::collections::BTreeMap;

/// Every tag with the number of notes carrying it, most used first.
pub fn run<B: StorageBackend>(store: &MetaStore<B>) -> Result<CmdResult> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for component in store.load_meta().values() {
        for tag in &component.tags {
            *counts.entry(tag.clone()).or_default() += 1;
        }
    }

    let mut tag_counts: Vec<(String, usize)> = counts.into_iter().collect();
    // stable sort keeps names alphabetical within equal counts
    tag_counts.sort_by(|a, b| b.1.cmp(&a.1));

    let mut result = CmdResult::default();
    if tag_counts.is_empty() {
        result.add_message(CmdMessage::info("No tags in use"));
    }
    result.tag_counts = tag_counts;
    Ok(result)
}
