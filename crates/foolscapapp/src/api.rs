//! # API Facade
//!
//! A thin facade over the command layer and the single entry point for
//! clients. It normalizes inputs (draft files into lines) and dispatches; the
//! logic lives in `commands/*.rs`.
//!
//! ## Generic Over the Backend
//!
//! `FoolscapApi<B: StorageBackend>` runs on either backend:
//! - Production: `FoolscapApi<FsBackend>`
//! - Testing: `FoolscapApi<MemBackend>`
//!
//! API tests check dispatch and input handling, not command logic.

use crate::commands::{self, list::ListFilter, CmdResult};
use crate::config::{FoolscapConfig, FoolscapPaths};
use crate::error::Result;
use crate::store::backend::StorageBackend;
use crate::store::fs_backend::FsBackend;
use crate::store::MetaStore;
use std::fs;
use std::path::Path;

pub struct FoolscapApi<B: StorageBackend> {
    store: MetaStore<B>,
}

impl FoolscapApi<FsBackend> {
    /// Loads the config under `paths` and opens the filesystem store there.
    pub fn open(paths: FoolscapPaths) -> Result<Self> {
        let config = FoolscapConfig::load(&paths)?;
        let backend = FsBackend::new(paths).with_file_ext(&config.file_ext());
        Ok(Self::new(MetaStore::new(backend, config)))
    }
}

impl<B: StorageBackend> FoolscapApi<B> {
    pub fn new(store: MetaStore<B>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &MetaStore<B> {
        &self.store
    }

    pub fn new_note<S: AsRef<str>>(&self, draft: &[S]) -> Result<CmdResult> {
        commands::new::run(&self.store, draft)
    }

    pub fn new_note_from_file(&self, path: &Path) -> Result<CmdResult> {
        let text = fs::read_to_string(path)?;
        self.new_note(&text.lines().collect::<Vec<_>>())
    }

    pub fn save_note(&self, name: &str) -> Result<CmdResult> {
        commands::save::run(&self.store, name)
    }

    pub fn view_note(&self, name: &str) -> Result<CmdResult> {
        commands::view::run(&self.store, name)
    }

    pub fn edit_target(&self, name: &str) -> Result<CmdResult> {
        commands::edit::run(&self.store, name)
    }

    pub fn delete_note(&self, name: &str) -> Result<CmdResult> {
        commands::delete::run(&self.store, name)
    }

    pub fn list_notes(&self, filter: &ListFilter) -> Result<CmdResult> {
        commands::list::run(&self.store, filter)
    }

    pub fn search(&self, term: &str) -> Result<CmdResult> {
        commands::search::run(&self.store, term)
    }

    pub fn tags(&self) -> Result<CmdResult> {
        commands::tags::run(&self.store)
    }

    pub fn upgrade(&self) -> Result<CmdResult> {
        commands::upgrade::run(&self.store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FoolscapError;
    use crate::store::mem_backend::MemBackend;
    use std::io::Write;

    fn make_api() -> FoolscapApi<MemBackend> {
        FoolscapApi::new(MetaStore::new(MemBackend::new(), FoolscapConfig::default()))
    }

    const DRAFT: [&str; 5] = ["# note", "====", ":desc", "{a}", "===="];

    #[test]
    fn test_new_then_view_dispatch() {
        let api = make_api();
        let created = api.new_note(&DRAFT).unwrap();
        assert_eq!(created.affected_notes, vec!["note"]);

        let viewed = api.view_note("note").unwrap();
        assert_eq!(viewed.contents, vec!["# note\n====\n:desc\n{a}\n====\n"]);
    }

    #[test]
    fn test_new_note_from_file() {
        let api = make_api();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{}", DRAFT.join("\n")).unwrap();

        let result = api.new_note_from_file(file.path()).unwrap();
        assert_eq!(result.affected_notes, vec!["note"]);
    }

    #[test]
    fn test_new_note_from_missing_file_is_io_error() {
        let api = make_api();
        let result = api.new_note_from_file(Path::new("/definitely/not/here.txt"));
        assert!(matches!(result, Err(FoolscapError::Io(_))));
    }

    #[test]
    fn test_edit_save_delete_dispatch() {
        let api = make_api();
        api.new_note(&DRAFT).unwrap();

        assert_eq!(api.edit_target("note").unwrap().affected_notes, vec!["note"]);
        assert_eq!(api.save_note("note").unwrap().affected_notes, vec!["note"]);
        api.delete_note("note").unwrap();
        assert!(api.list_notes(&ListFilter::default()).unwrap().listed_notes.is_empty());
    }

    #[test]
    fn test_search_tags_upgrade_dispatch() {
        let api = make_api();
        api.new_note(&DRAFT).unwrap();

        assert_eq!(api.search("desc").unwrap().listed_notes.len(), 1);
        assert_eq!(api.tags().unwrap().tag_counts, vec![("a".to_string(), 1)]);
        assert!(api.upgrade().is_ok());
    }
}
