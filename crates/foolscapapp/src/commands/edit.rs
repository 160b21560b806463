use crate::commands::helpers::resolve_name;
use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::backend::StorageBackend;
use crate::store::MetaStore;

/// What the editor launcher needs: the note path and its vim commands.
///
/// `affected_notes` holds the resolved name, which the client saves once the
/// editor exits.
pub fn run<B: StorageBackend>(store: &MetaStore<B>, name: &str) -> Result<CmdResult> {
    let (resolved, guess) = resolve_name(store, name)?;

    let mut result =
        CmdResult::default().with_note_paths(vec![store.backend().note_path(&resolved)]);
    result.editor_cmds = store.get_cmds(&resolved);
    if let Some(message) = guess {
        result.add_message(message);
    }
    Ok(result.with_affected_notes(vec![resolved]))
}
