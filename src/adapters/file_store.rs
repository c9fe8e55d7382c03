//! File-backed key-value store.
//!
//! Entries live in memory behind a mutex and are written through to a
//! pretty-printed JSON object on every mutation, by default at
//! `~/.folio/storage.json`.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use tracing::warn;

use crate::traits::{KeyValueStore, StorageError};

/// The storage directory name.
const STORAGE_DIR: &str = ".folio";

/// The storage file name.
const STORAGE_FILE: &str = "storage.json";

/// Key-value store persisted as a JSON file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Default location of the storage file.
    ///
    /// Returns `None` if the home directory cannot be determined.
    pub fn default_path() -> Option<PathBuf> {
        let home = dirs::home_dir()?;
        Some(home.join(STORAGE_DIR).join(STORAGE_FILE))
    }

    /// Open the store at `path`, loading existing entries.
    ///
    /// A missing file is an empty store. A file that is not a JSON object of
    /// strings is treated as empty too (and overwritten on the next write);
    /// only a file that exists but cannot be read is an error.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let entries = Self::load(&path)?;
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Get the path to the storage file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(path: &Path) -> Result<BTreeMap<String, String>, StorageError> {
        if !path.exists() {
            return Ok(BTreeMap::new());
        }

        let file = File::open(path)?;
        match serde_json::from_reader(BufReader::new(file)) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring unreadable storage file");
                Ok(BTreeMap::new())
            }
        }
    }

    /// Write `entries` to disk via a temp file and rename.
    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp_path = self.path.with_extension("json.tmp");
        {
            let file = File::create(&tmp_path)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, entries)?;
            writer.flush()?;
        }
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, String>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Apply `mutate` to a copy of the entries, persist it, then publish it.
    /// On a failed write the in-memory view is left untouched.
    fn update<F>(&self, mutate: F) -> Result<(), StorageError>
    where
        F: FnOnce(&mut BTreeMap<String, String>),
    {
        let mut entries = self.lock();
        let mut next = entries.clone();
        mutate(&mut next);
        if next == *entries {
            return Ok(());
        }
        self.persist(&next)?;
        *entries = next;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.update(|entries| {
            entries.remove(key);
        })
    }

    fn set_many(&self, pairs: &[(&str, &str)]) -> Result<(), StorageError> {
        self.update(|entries| {
            for (key, value) in pairs {
                entries.insert(key.to_string(), value.to_string());
            }
        })
    }

    fn remove_many(&self, keys: &[&str]) -> Result<(), StorageError> {
        self.update(|entries| {
            for key in keys {
                entries.remove(*key);
            }
        })
    }
}
