use crate::error::Result;
use crate::model::MetaIndex;
use std::path::PathBuf;

/// Abstract interface for raw storage I/O.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while MetaStore handles the "what" (components, renames, tag diffs).
pub trait StorageBackend {
    // --- Index Operations ---

    /// Load the metadata index.
    /// Returns an empty index when none was ever saved.
    /// Returns Err when the index exists but cannot be read or decoded.
    fn load_index(&self) -> Result<MetaIndex>;

    /// Save the metadata index. MUST be atomic.
    fn save_index(&self, index: &MetaIndex) -> Result<()>;

    /// Snapshot the persisted index as it is right now (before a migration).
    fn backup_index(&self) -> Result<()>;

    // --- Note Text Operations ---

    /// Read the text of a note.
    /// Returns Ok(None) if the note has no text on disk.
    fn read_note(&self, name: &str) -> Result<Option<String>>;

    /// Write the text of a note, replacing any previous text.
    fn write_note(&self, name: &str, text: &str) -> Result<()>;

    /// Move note text to a new name. A missing source is not an error.
    fn rename_note(&self, old_name: &str, new_name: &str) -> Result<()>;

    /// Move note text into the recycle bin. A missing note is not an error.
    fn delete_note(&self, name: &str) -> Result<()>;

    // --- Discovery & Paths ---

    /// Names of every note with text in storage.
    fn list_note_names(&self) -> Result<Vec<String>>;

    /// Where the text of a note lives (a virtual path for in-memory storage).
    fn note_path(&self, name: &str) -> PathBuf;
}
