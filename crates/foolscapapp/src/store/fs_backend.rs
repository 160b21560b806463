use super::backend::StorageBackend;
use crate::config::FoolscapPaths;
use crate::error::{FoolscapError, Result};
use crate::model::MetaIndex;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub struct FsBackend {
    paths: FoolscapPaths,
    file_ext: String,
}

impl FsBackend {
    pub fn new(paths: FoolscapPaths) -> Self {
        Self {
            paths,
            file_ext: ".txt".to_string(),
        }
    }

    pub fn with_file_ext(mut self, ext: &str) -> Self {
        if ext.starts_with('.') {
            self.file_ext = ext.to_string();
        } else {
            self.file_ext = format!(".{}", ext);
        }
        self
    }

    pub fn paths(&self) -> &FoolscapPaths {
        &self.paths
    }

    fn note_filename(&self, name: &str) -> String {
        format!("{}{}", name, self.file_ext)
    }

    fn bin_path(&self, name: &str) -> PathBuf {
        self.paths.bin_dir().join(self.note_filename(name))
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(FoolscapError::Io)?;
        }
        Ok(())
    }

    /// Write to a temp file in the target directory, then rename over the target.
    fn atomic_write(&self, target: &Path, content: &str) -> Result<()> {
        let dir = target
            .parent()
            .ok_or_else(|| FoolscapError::Store(format!("No parent for {}", target.display())))?;
        self.ensure_dir(dir)?;

        let tmp = dir.join(format!(".foolscap-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp, content).map_err(FoolscapError::Io)?;
        fs::rename(&tmp, target).map_err(FoolscapError::Io)?;
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn load_index(&self) -> Result<MetaIndex> {
        let data_file = self.paths.data_file();
        if !data_file.exists() {
            return Ok(MetaIndex::new());
        }
        let content = fs::read_to_string(data_file).map_err(FoolscapError::Io)?;
        let index: MetaIndex =
            serde_json::from_str(&content).map_err(FoolscapError::Serialization)?;
        Ok(index)
    }

    fn save_index(&self, index: &MetaIndex) -> Result<()> {
        let content = serde_json::to_string_pretty(index).map_err(FoolscapError::Serialization)?;
        self.atomic_write(&self.paths.data_file(), &content)
    }

    fn backup_index(&self) -> Result<()> {
        let data_file = self.paths.data_file();
        if !data_file.exists() {
            return Ok(());
        }
        let raw = fs::read_to_string(data_file).map_err(FoolscapError::Io)?;
        self.atomic_write(&self.paths.backup_file(), &raw)
    }

    fn read_note(&self, name: &str) -> Result<Option<String>> {
        let path = self.note_path(name);
        if !path.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(path).map_err(FoolscapError::Io)?;
        Ok(Some(text))
    }

    fn write_note(&self, name: &str, text: &str) -> Result<()> {
        self.atomic_write(&self.note_path(name), text)
    }

    fn rename_note(&self, old_name: &str, new_name: &str) -> Result<()> {
        let from = self.note_path(old_name);
        if !from.exists() {
            return Ok(());
        }
        fs::rename(from, self.note_path(new_name)).map_err(FoolscapError::Io)?;
        Ok(())
    }

    fn delete_note(&self, name: &str) -> Result<()> {
        let from = self.note_path(name);
        if !from.exists() {
            return Ok(());
        }
        self.ensure_dir(&self.paths.bin_dir())?;
        fs::rename(from, self.bin_path(name)).map_err(FoolscapError::Io)?;
        Ok(())
    }

    fn list_note_names(&self) -> Result<Vec<String>> {
        let dir = self.paths.notes_dir();
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&dir).map_err(FoolscapError::Io)? {
            let path = entry.map_err(FoolscapError::Io)?.path();
            if !path.is_file() {
                continue;
            }
            let Some(file_name) = path.file_name().and_then(|s| s.to_str()) else {
                continue;
            };
            if let Some(name) = file_name.strip_suffix(self.file_ext.as_str()) {
                if !name.is_empty() && !name.starts_with('.') {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    fn note_path(&self, name: &str) -> PathBuf {
        self.paths.notes_dir().join(self.note_filename(name))
    }
}
