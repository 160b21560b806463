use crate::commands::CmdMessage;
use crate::error::{FoolscapError, Result};
use crate::store::backend::StorageBackend;
use crate::store::MetaStore;

/// Resolves user input to an index key: the exact name, else the closest one.
///
/// The message is set when a fuzzy guess was used, so the client can say so.
pub fn resolve_name<B: StorageBackend>(
    store: &MetaStore<B>,
    name: &str,
) -> Result<(String, Option<CmdMessage>)> {
    let resolved = store
        .lookup(name)
        .ok_or_else(|| FoolscapError::NoteNotFound(name.to_string()))?;
    let note = (resolved != name)
        .then(|| CmdMessage::info(format!("No note named '{}', using '{}'", name, resolved)));
    Ok((resolved, note))
}

/// Resolves user input to an existing index key, with no fuzzy fallback.
pub fn require_exact<B: StorageBackend>(store: &MetaStore<B>, name: &str) -> Result<String> {
    if store.load_meta().contains_key(name) {
        Ok(name.to_string())
    } else {
        Err(FoolscapError::NoteNotFound(name.to_string()))
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::{draft, store_with};
    use super::*;

    #[test]
    fn test_resolve_exact_name_has_no_message() {
        let store = store_with(&[draft("note", "d", "{a}")]);
        let (name, message) = resolve_name(&store, "note").unwrap();
        assert_eq!(name, "note");
        assert!(message.is_none());
    }

    #[test]
    fn test_resolve_fuzzy_name_explains_itself() {
        let store = store_with(&[draft("note", "d", "{a}")]);
        let (name, message) = resolve_name(&store, "nots").unwrap();
        assert_eq!(name, "note");
        assert!(message.unwrap().content.contains("using 'note'"));
    }

    #[test]
    fn test_resolve_unknown_name() {
        let store = store_with(&[draft("note", "d", "{a}")]);
        let result = resolve_name(&store, "completely_different");
        assert!(matches!(result, Err(FoolscapError::NoteNotFound(_))));
    }

    #[test]
    fn test_require_exact_ignores_close_names() {
        let store = store_with(&[draft("note", "d", "{a}")]);
        assert_eq!(require_exact(&store, "note").unwrap(), "note");
        assert!(require_exact(&store, "nots").is_err());
    }
}
