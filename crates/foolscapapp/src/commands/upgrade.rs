use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::backend::StorageBackend;
use crate::store::MetaStore;

/// Rewrites the metadata index in the current schema.
///
/// Note files that have no component are reported but left alone; `save`
/// on one of them fails until it is re-created with `new`.
pub fn run<B: StorageBackend>(store: &MetaStore<B>) -> Result<CmdResult> {
    store.upgrade_components()?;
    let index = store.load_meta();
    let count = index.len();

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Upgraded {} component{}",
        count,
        if count == 1 { "" } else { "s" }
    )));
    for orphan in store
        .backend()
        .list_note_names()?
        .into_iter()
        .filter(|name| !index.contains_key(name))
    {
        result.add_message(CmdMessage::warning(format!(
            "Note file without metadata: {}",
            orphan
        )));
    }
    Ok(result)
}
