//! Key/value persistence backing the preference store
//!
//! Storage never fails from the caller's point of view: a backend that cannot
//! read reports "no value", and a backend that cannot write drops the write.

use log::*;
use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

/// String key/value storage with browser-storage semantics
pub trait Storage {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&mut self, key: &str, value: &str);
    fn remove_item(&mut self, key: &str);
}

/// Storage kept in process memory only
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MemoryStorage {
    items: BTreeMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MemoryStorage {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            items: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) {
        self.items.insert(key.to_string(), value.to_string());
    }

    fn remove_item(&mut self, key: &str) {
        self.items.remove(key);
    }
}

/// Stands in for an environment that has no storage at all
#[derive(Debug, Default, Clone, Copy)]
pub struct DetachedStorage;

impl Storage for DetachedStorage {
    fn get_item(&self, _key: &str) -> Option<String> {
        None
    }

    fn set_item(&mut self, key: &str, _value: &str) {
        trace!("No storage available, dropping write to {key}");
    }

    fn remove_item(&mut self, _key: &str) {}
}

/// Storage persisted as a single JSON object on disk
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    items: BTreeMap<String, String>,
}

impl FileStorage {
    /// Opens the storage file, starting empty if it is missing or unreadable.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let items = match load_items(&path) {
            Ok(items) => items,
            Err(e) => {
                warn!(
                    "Could not read storage {}: {e}. Starting empty.",
                    path.display()
                );
                BTreeMap::new()
            }
        };
        Self { path, items }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) {
        if let Err(e) = save_items(&self.path, &self.items) {
            warn!("Could not write storage {}: {e}", self.path.display());
        }
    }
}

fn load_items(path: &Path) -> color_eyre::Result<BTreeMap<String, String>> {
    if !path.exists() {
        debug!("No storage file at {}", path.display());
        return Ok(BTreeMap::new());
    }
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

fn save_items(path: &Path, items: &BTreeMap<String, String>) -> color_eyre::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), items)?;
    Ok(())
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) {
        debug!("Storing {key}={value}");
        self.items.insert(key.to_string(), value.to_string());
        self.persist();
    }

    fn remove_item(&mut self, key: &str) {
        if self.items.remove(key).is_some() {
            debug!("Removed {key}");
            self.persist();
        }
    }
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn get_item(&self, key: &str) -> Option<String> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) {
        (**self).set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) {
        (**self).remove_item(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.get_item("lang"), None);
        storage.set_item("lang", "en");
        assert_eq!(storage.get_item("lang").as_deref(), Some("en"));
        storage.remove_item("lang");
        assert!(storage.is_empty());
    }

    #[test]
    fn test_detached_storage_drops_writes() {
        let mut storage = DetachedStorage;
        storage.set_item("lang", "en");
        assert_eq!(storage.get_item("lang"), None);
    }

    #[test]
    fn test_file_storage_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let mut storage = FileStorage::open(&path);
        storage.set_item("app:themeColor", "2501222");
        storage.set_item("lang", "en");
        storage.remove_item("lang");

        let reopened = FileStorage::open(&path);
        assert_eq!(reopened.path(), path.as_path());
        assert_eq!(
            reopened.get_item("app:themeColor").as_deref(),
            Some("2501222")
        );
        assert_eq!(reopened.get_item("lang"), None);
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "{ not json").unwrap();

        let mut storage = FileStorage::open(&path);
        assert_eq!(storage.get_item("lang"), None);
        storage.set_item("lang", "en");
        assert_eq!(FileStorage::open(&path).get_item("lang").as_deref(), Some("en"));
    }
}
