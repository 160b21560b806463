use crate::commands::{CmdMessage, CmdResult, ListedNote};
use crate::error::{FoolscapError, Result};
use crate::store::backend::StorageBackend;
use crate::store::MetaStore;

/// Re-syncs a note's component after its text was edited.
pub fn run<B: StorageBackend>(store: &MetaStore<B>, name: &str) -> Result<CmdResult> {
    let saved = store.update_component(name)?;
    let component = store
        .get_component(&saved)
        .ok_or_else(|| FoolscapError::NoteNotFound(saved.clone()))?;

    let mut result = CmdResult::default();
    if saved != name {
        result.add_message(CmdMessage::info(format!("Renamed {} to {}", name, saved)));
    }
    result.add_message(CmdMessage::success(format!("Saved note: {}", saved)));
    result.listed_notes.push(ListedNote::new(&saved, component));
    Ok(result.with_affected_notes(vec![saved]))
}
