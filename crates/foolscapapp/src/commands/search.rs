use crate::commands::{CmdMessage, CmdResult, ListedNote};
use crate::error::{FoolscapError, Result};
use crate::model::Component;
use crate::store::backend::StorageBackend;
use crate::store::MetaStore;

fn matches(name: &str, component: &Component, term_lower: &str) -> bool {
    name.to_lowercase().contains(term_lower)
        || component.description.to_lowercase().contains(term_lower)
        || component
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(term_lower))
}

/// Case-insensitive substring search over names, descriptions and tags.
pub fn run<B: StorageBackend>(store: &MetaStore<B>, term: &str) -> Result<CmdResult> {
    let term_lower = term.trim().to_lowercase();
    if term_lower.is_empty() {
        return Err(FoolscapError::Api("Search term cannot be empty".to_string()));
    }

    let hits: Vec<ListedNote> = store
        .load_meta()
        .into_iter()
        .filter(|(name, component)| matches(name, component, &term_lower))
        .map(|(name, component)| ListedNote::new(name, component))
        .collect();

    let mut result = CmdResult::default();
    let count = hits.len();
    result.add_message(CmdMessage::info(format!(
        "{} note{} matching '{}'",
        count,
        if count == 1 { "" } else { "s" },
        term.trim()
    )));
    Ok(result.with_listed_notes(hits))
}
