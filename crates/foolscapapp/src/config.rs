//! # Configuration
//!
//! Configuration is loaded once at process start and handed to the store by
//! reference. Nothing reads the environment after that point.
//!
//! ## Storage Root
//!
//! The root directory comes from `FSCAP_PATH`. A relative value is taken
//! relative to the home directory (`FSCAP_PATH=.foolscap` → `~/.foolscap`).
//! Without it, the OS data directory is used (via the `directories` crate).
//!
//! ```text
//! <root>/
//! ├── foolscap.toml            # Optional settings file
//! ├── data/note_data.json      # Metadata index
//! ├── data/backup_data.json    # Snapshot taken before migrations
//! ├── notes/{name}.txt         # Note text
//! └── deleted/{name}.txt       # Recycle bin
//! ```
//!
//! ## Settings
//!
//! Resolved by [`confique`] in priority order: environment variables, then
//! `<root>/foolscap.toml`, then compiled defaults.
//!
//! | Key | Env | Default | Description |
//! |-----|-----|---------|-------------|
//! | `default_book` | `FSCAP_DEFAULT_BOOK` | `general` | Book for new components |
//! | `fuzzy_cutoff` | `FSCAP_FUZZY_CUTOFF` | `0.6` | Minimum similarity for name guesses |
//! | `file_ext` | `FSCAP_FILE_EXT` | `.txt` | Extension of note files |

use crate::error::{FoolscapError, Result};
use confique::Config;
use directories::{BaseDirs, ProjectDirs};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const ROOT_ENV: &str = "FSCAP_PATH";
pub const CONFIG_FILENAME: &str = "foolscap.toml";

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FoolscapConfig {
    /// Book assigned to new components
    #[config(default = "general", env = "FSCAP_DEFAULT_BOOK")]
    pub default_book: String,

    /// Minimum similarity ratio (0 to 1) for a fuzzy name guess
    #[config(default = 0.6, env = "FSCAP_FUZZY_CUTOFF")]
    pub fuzzy_cutoff: f64,

    /// Extension of note files (e.g. ".txt", ".md")
    #[config(default = ".txt", env = "FSCAP_FILE_EXT")]
    pub file_ext: String,
}

impl Default for FoolscapConfig {
    fn default() -> Self {
        Self {
            default_book: crate::model::DEFAULT_BOOK.to_string(),
            fuzzy_cutoff: crate::fuzzy::DEFAULT_CUTOFF,
            file_ext: ".txt".to_string(),
        }
    }
}

impl FoolscapConfig {
    /// Loads settings for a storage root: env vars, then `foolscap.toml`, then defaults.
    pub fn load(paths: &FoolscapPaths) -> Result<Self> {
        let config = FoolscapConfig::builder()
            .env()
            .file(paths.config_file())
            .load()?;
        config.validate()
    }

    fn validate(self) -> Result<Self> {
        if !(0.0..=1.0).contains(&self.fuzzy_cutoff) {
            return Err(FoolscapError::Config(format!(
                "fuzzy_cutoff must be between 0 and 1, got {}",
                self.fuzzy_cutoff
            )));
        }
        Ok(self)
    }

    /// File extension, normalized to start with a dot.
    pub fn file_ext(&self) -> String {
        if self.file_ext.starts_with('.') {
            self.file_ext.clone()
        } else {
            format!(".{}", self.file_ext)
        }
    }
}

/// Locations of everything foolscap persists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoolscapPaths {
    pub root: PathBuf,
}

impl FoolscapPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolves the root from `FSCAP_PATH`, falling back to the OS data directory.
    pub fn from_env() -> Result<Self> {
        Self::from_location(std::env::var(ROOT_ENV).ok().as_deref())
    }

    pub fn from_location(location: Option<&str>) -> Result<Self> {
        match location.map(str::trim).filter(|l| !l.is_empty()) {
            Some(location) if Path::new(location).is_absolute() => Ok(Self::new(location)),
            Some(location) => {
                let base = BaseDirs::new().ok_or_else(|| {
                    FoolscapError::Config("Could not determine home directory".to_string())
                })?;
                Ok(Self::new(base.home_dir().join(location)))
            }
            None => {
                let dirs = ProjectDirs::from("com", "foolscap", "foolscap").ok_or_else(|| {
                    FoolscapError::Config("Could not determine data directory".to_string())
                })?;
                Ok(Self::new(dirs.data_dir()))
            }
        }
    }

    pub fn data_dir(&self) -> PathBuf {
        self.root.join("data")
    }

    pub fn data_file(&self) -> PathBuf {
        self.data_dir().join("note_data.json")
    }

    pub fn backup_file(&self) -> PathBuf {
        self.data_dir().join("backup_data.json")
    }

    pub fn notes_dir(&self) -> PathBuf {
        self.root.join("notes")
    }

    pub fn bin_dir(&self) -> PathBuf {
        self.root.join("deleted")
    }

    pub fn config_file(&self) -> PathBuf {
        self.root.join(CONFIG_FILENAME)
    }
}
