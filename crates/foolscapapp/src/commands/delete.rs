use crate::commands::helpers::require_exact;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::backend::StorageBackend;
use crate::store::MetaStore;

/// Removes a note's component and moves its text into the recycle bin.
///
/// Deletion never guesses: the name must match exactly.
pub fn run<B: StorageBackend>(store: &MetaStore<B>, name: &str) -> Result<CmdResult> {
    let name = require_exact(store, name)?;
    store.remove_component(&name)?;
    store.backend().delete_note(&name)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Deleted note: {}", name)));
    Ok(result.with_affected_notes(vec![name]))
}
