use super::backend::StorageBackend;
use crate::error::{FoolscapError, Result};
use crate::model::MetaIndex;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since foolscap is single-threaded.
/// This keeps every `StorageBackend` method on `&self`.
#[derive(Default)]
pub struct MemBackend {
    index: RefCell<Option<MetaIndex>>,
    backup: RefCell<Option<MetaIndex>>,
    notes: RefCell<BTreeMap<String, String>>,
    bin: RefCell<BTreeMap<String, String>>,
    simulate_write_error: RefCell<bool>,
    simulate_corrupt_index: RefCell<bool>,
    simulate_index_write_error: RefCell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Make `load_index` fail as if the persisted index were garbage.
    pub fn set_simulate_corrupt_index(&self, simulate: bool) {
        *self.simulate_corrupt_index.borrow_mut() = simulate;
    }

    /// Make only `save_index` fail; note text stays writable.
    pub fn set_simulate_index_write_error(&self, simulate: bool) {
        *self.simulate_index_write_error.borrow_mut() = simulate;
    }

    /// Test helper: the index as last saved, `None` if never saved.
    pub fn saved_index(&self) -> Option<MetaIndex> {
        self.index.borrow().clone()
    }

    /// Test helper: the snapshot taken by `backup_index`.
    pub fn backup(&self) -> Option<MetaIndex> {
        self.backup.borrow().clone()
    }

    /// Test helper: text moved to the recycle bin.
    pub fn binned_note(&self, name: &str) -> Option<String> {
        self.bin.borrow().get(name).cloned()
    }

    fn check_writable(&self) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(FoolscapError::Store("Simulated write error".to_string()));
        }
        Ok(())
    }
}

impl StorageBackend for MemBackend {
    fn load_index(&self) -> Result<MetaIndex> {
        if *self.simulate_corrupt_index.borrow() {
            return Err(FoolscapError::Store("Simulated corrupt index".to_string()));
        }
        Ok(self.index.borrow().clone().unwrap_or_default())
    }

    fn save_index(&self, index: &MetaIndex) -> Result<()> {
        self.check_writable()?;
        if *self.simulate_index_write_error.borrow() {
            return Err(FoolscapError::Store("Simulated index write error".to_string()));
        }
        *self.index.borrow_mut() = Some(index.clone());
        Ok(())
    }

    fn backup_index(&self) -> Result<()> {
        self.check_writable()?;
        let current = self.index.borrow().clone();
        if current.is_some() {
            *self.backup.borrow_mut() = current;
        }
        Ok(())
    }

    fn read_note(&self, name: &str) -> Result<Option<String>> {
        Ok(self.notes.borrow().get(name).cloned())
    }

    fn write_note(&self, name: &str, text: &str) -> Result<()> {
        self.check_writable()?;
        self.notes
            .borrow_mut()
            .insert(name.to_string(), text.to_string());
        Ok(())
    }

    fn rename_note(&self, old_name: &str, new_name: &str) -> Result<()> {
        self.check_writable()?;
        let mut notes = self.notes.borrow_mut();
        if let Some(text) = notes.remove(old_name) {
            notes.insert(new_name.to_string(), text);
        }
        Ok(())
    }

    fn delete_note(&self, name: &str) -> Result<()> {
        self.check_writable()?;
        if let Some(text) = self.notes.borrow_mut().remove(name) {
            self.bin.borrow_mut().insert(name.to_string(), text);
        }
        Ok(())
    }

    fn list_note_names(&self) -> Result<Vec<String>> {
        Ok(self.notes.borrow().keys().cloned().collect())
    }

    fn note_path(&self, name: &str) -> PathBuf {
        PathBuf::from(format!("memory://notes/{}", name))
    }
}
