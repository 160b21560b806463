use crate::commands::{CmdMessage, CmdResult, ListedNote};
use crate::error::Result;
use crate::model::Component;
use crate::store::backend::StorageBackend;
use crate::store::MetaStore;

#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    pub tag: Option<String>,
    pub book: Option<String>,
}

impl ListFilter {
    pub fn matches(&self, component: &Component) -> bool {
        let tag_ok = self.tag.as_deref().map_or(true, |tag| component.has_tag(tag));
        let book_ok = self
            .book
            .as_deref()
            .map_or(true, |book| component.book == book);
        tag_ok && book_ok
    }
}

/// Components matching the filter, sorted by name.
pub fn run<B: StorageBackend>(store: &MetaStore<B>, filter: &ListFilter) -> Result<CmdResult> {
    let notes: Vec<ListedNote> = store
        .load_meta()
        .into_iter()
        .filter(|(_, component)| filter.matches(component))
        .map(|(name, component)| ListedNote::new(name, component))
        .collect();

    let mut result = CmdResult::default();
    if notes.is_empty() {
        result.add_message(CmdMessage::info("No notes found"));
    }
    Ok(result.with_listed_notes(notes))
}
