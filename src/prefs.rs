// String-keyed preference storage.
// One JSON object file per app; every mutation rewrites it atomically.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ShellError;

pub const PREFS_FILE: &str = "sodium_prefs.json";

/// The persistence primitive the stores are built on.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn put(&mut self, key: &str, value: String) -> Result<(), ShellError>;
    fn remove(&mut self, key: &str) -> Result<(), ShellError>;
}

/// Writes `contents` to a sibling tmp file, then renames it over `path`.
/// A crash mid-write leaves the previous file intact.
pub fn write_atomic(path: &Path, contents: &str) -> Result<(), ShellError> {
    let tmp_path = path.with_extension("tmp");
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let result = fs::write(&tmp_path, contents).and_then(|_| fs::rename(&tmp_path, path));
    if let Err(e) = result {
        if tmp_path.exists() {
            if let Err(cleanup) = fs::remove_file(&tmp_path) {
                log::warn!("[Prefs] Failed to remove {:?}: {}", tmp_path, cleanup);
            }
        }
        return Err(e.into());
    }
    Ok(())
}

pub struct FilePreferences {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FilePreferences {
    pub fn open(path: PathBuf) -> Self {
        let values = if path.exists() {
            match fs::read_to_string(&path) {
                Ok(json) => match serde_json::from_str(&json) {
                    Ok(values) => values,
                    Err(e) => {
                        log::warn!("[Prefs] Failed to parse {:?}: {}, starting empty", path, e);
                        BTreeMap::new()
                    }
                },
                Err(e) => {
                    log::warn!("[Prefs] Failed to read {:?}: {}, starting empty", path, e);
                    BTreeMap::new()
                }
            }
        } else {
            BTreeMap::new()
        };

        Self { path, values }
    }

    pub fn open_in(data_dir: &Path) -> Self {
        Self::open(data_dir.join(PREFS_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), ShellError> {
        let json = serde_json::to_string_pretty(&self.values)?;
        write_atomic(&self.path, &json)
    }

    /// Applies `change`, flushes, and puts the old value back if the flush fails.
    fn commit(&mut self, key: &str, change: Option<String>) -> Result<(), ShellError> {
        let previous = match change {
            Some(value) => self.values.insert(key.to_string(), value),
            None => self.values.remove(key),
        };

        if let Err(e) = self.flush() {
            log::warn!("[Prefs] Write of '{}' failed: {}", key, e);
            match previous {
                Some(old) => self.values.insert(key.to_string(), old),
                None => self.values.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }
}

impl KeyValueStore for FilePreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn put(&mut self, key: &str, value: String) -> Result<(), ShellError> {
        self.commit(key, Some(value))
    }

    fn remove(&mut self, key: &str) -> Result<(), ShellError> {
        if !self.values.contains_key(key) {
            return Ok(());
        }
        self.commit(key, None)
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemoryPreferences {
    values: BTreeMap<String, String>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(key: &str, value: &str) -> Self {
        let mut prefs = Self::new();
        prefs.values.insert(key.to_string(), value.to_string());
        prefs
    }
}

impl KeyValueStore for MemoryPreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn put(&mut self, key: &str, value: String) -> Result<(), ShellError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), ShellError> {
        self.values.remove(key);
        Ok(())
    }
}
