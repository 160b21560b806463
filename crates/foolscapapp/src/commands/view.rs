use crate::commands::helpers::resolve_name;
use crate::commands::{CmdResult, ListedNote};
use crate::error::{FoolscapError, Result};
use crate::store::backend::StorageBackend;
use crate::store::MetaStore;

pub fn run<B: StorageBackend>(store: &MetaStore<B>, name: &str) -> Result<CmdResult> {
    let (resolved, guess) = resolve_name(store, name)?;
    let text = store
        .backend()
        .read_note(&resolved)?
        .ok_or_else(|| FoolscapError::NoteNotFound(resolved.clone()))?;
    let component = store
        .get_component(&resolved)
        .ok_or_else(|| FoolscapError::NoteNotFound(resolved.clone()))?;

    let mut result = CmdResult::default()
        .with_note_paths(vec![store.backend().note_path(&resolved)])
        .with_listed_notes(vec![ListedNote::new(&resolved, component)]);
    result.contents.push(text);
    if let Some(message) = guess {
        result.add_message(message);
    }
    Ok(result)
}
