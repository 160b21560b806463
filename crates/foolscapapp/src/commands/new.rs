//! Create notes from a draft.
//!
//! A draft may hold several note blocks; each becomes its own note. Moving
//! lines are dropped and clashing headings get a numeric suffix.

use crate::commands::{CmdMessage, CmdResult};
use crate::error::{FoolscapError, Result};
use crate::store::backend::StorageBackend;
use crate::store::MetaStore;

/// Skeleton offered to the editor when a note is started from scratch.
pub const NOTE_TEMPLATE: &str = "# title
====================
:description

====================
";

pub fn run<B: StorageBackend, S: AsRef<str>>(store: &MetaStore<B>, draft: &[S]) -> Result<CmdResult> {
    let names = store.new_component(draft)?;
    if names.is_empty() {
        return Err(FoolscapError::Api(
            "No note found in draft: expected a '# name' heading followed by a '====' line"
                .to_string(),
        ));
    }

    let mut result = CmdResult::default();
    for name in &names {
        result.add_message(CmdMessage::success(format!("Created note: {}", name)));
        result.note_paths.push(store.backend().note_path(name));
    }
    Ok(result.with_affected_notes(names))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::helpers::fixtures::{draft, store_with};
    use crate::commands::MessageLevel;

    #[test]
    fn creates_every_block_in_draft() {
        let store = store_with(&[]);
        let text = format!("{}\n{}", draft("one", "first", "{a}"), draft("two", "second", "{b}"));
        let result = run(&store, &text.lines().collect::<Vec<_>>()).unwrap();

        assert_eq!(result.affected_notes, vec!["one", "two"]);
        assert_eq!(result.messages.len(), 2);
        assert_eq!(result.messages[0].level, MessageLevel::Success);
        assert_eq!(result.note_paths.len(), 2);
        assert!(store.note_exists("two"));
    }

    #[test]
    fn clashing_heading_gets_suffix() {
        let store = store_with(&[draft("note", "d", "{a}")]);
        let text = draft("note", "again", "{a}");
        let result = run(&store, &text.lines().collect::<Vec<_>>()).unwrap();
        assert_eq!(result.affected_notes, vec!["note_0"]);
    }

    #[test]
    fn draft_without_block_is_rejected() {
        let store = store_with(&[]);
        let result = run(&store, &["# heading only", "no delimiter"]);
        assert!(matches!(result, Err(FoolscapError::Api(_))));
        assert!(store.load_meta().is_empty());
    }

    #[test]
    fn template_is_a_valid_draft() {
        let store = store_with(&[]);
        let result = run(&store, &NOTE_TEMPLATE.lines().collect::<Vec<_>>()).unwrap();
        assert_eq!(result.affected_notes, vec!["title"]);
    }
}
