//! File-backed storage table

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::{debug, info};

use super::errors::{StorageError, StorageResult};
use crate::model::{Record, CLASS_FIELD};
use crate::registry::{ClassName, Coercion};

/// Backing file used when nothing else is configured
pub const DEFAULT_FILE_PATH: &str = "file.json";

/// In-memory table of every live record, mirrored to a single JSON file.
///
/// The table is the sole long-lived owner of records; callers work on
/// clones and write them back with `register` (or `Record::save`).
#[derive(Debug)]
pub struct FileStorage {
    /// Path to the backing file
    path: PathBuf,
    /// `<ClassName>.<id>` -> record, sorted by key
    objects: BTreeMap<String, Record>,
}

impl FileStorage {
    /// Creates an empty table backed by `path`. Nothing is read.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            objects: BTreeMap::new(),
        }
    }

    /// Creates a table backed by `path` and loads it.
    pub fn open(path: impl Into<PathBuf>) -> StorageResult<Self> {
        let mut storage = Self::new(path);
        storage.reload()?;
        Ok(storage)
    }

    /// Returns the path to the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read-only view of the live table.
    pub fn all(&self) -> &BTreeMap<String, Record> {
        &self.objects
    }

    pub fn get(&self, key: &str) -> Option<&Record> {
        self.objects.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.objects.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Records of one class, in key order.
    pub fn records_of(&self, class: ClassName) -> impl Iterator<Item = &Record> {
        self.objects
            .values()
            .filter(move |record| record.class_name() == class)
    }

    /// Number of keys belonging to `class`.
    pub fn count(&self, class: ClassName) -> usize {
        let prefix = format!("{}.", class.as_str());
        self.objects
            .keys()
            .filter(|key| key.starts_with(&prefix))
            .count()
    }

    /// Inserts or overwrites the entry for `record`'s key.
    pub fn register(&mut self, record: Record) {
        self.objects.insert(record.key(), record);
    }

    /// Removes the entry for `key`. Does not persist.
    pub fn delete(&mut self, key: &str) -> Option<Record> {
        let removed = self.objects.remove(key);
        if removed.is_some() {
            debug!(key, "record deleted");
        }
        removed
    }

    /// Rewrites the backing file with the full table.
    ///
    /// Parent directories are created if missing. The file handle is closed
    /// before returning on every path.
    pub fn persist(&self) -> StorageResult<()> {
        let table: Map<String, Value> = self
            .objects
            .iter()
            .map(|(key, record)| (key.clone(), Value::Object(record.to_representation())))
            .collect();
        let bytes = serde_json::to_vec(&table).map_err(StorageError::Serialize)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .map_err(|e| StorageError::io_error(parent, e))?;
            }
        }

        let mut file = File::create(&self.path).map_err(|e| StorageError::io_error(&self.path, e))?;
        file.write_all(&bytes)
            .and_then(|_| file.flush())
            .map_err(|e| StorageError::io_error(&self.path, e))?;

        debug!(
            records = table.len(),
            bytes = bytes.len(),
            path = %self.path.display(),
            "storage persisted"
        );
        Ok(())
    }

    /// Replaces the table with the backing file's contents.
    ///
    /// A missing file yields an empty table. Any entry that cannot be
    /// rebuilt fails the whole reload with `CorruptState` and leaves the
    /// current table untouched.
    pub fn reload(&mut self) -> StorageResult<()> {
        let content = match fs::read(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                self.objects.clear();
                info!(path = %self.path.display(), "no storage file, starting empty");
                return Ok(());
            }
            Err(e) => return Err(StorageError::io_error(&self.path, e)),
        };

        let table: Map<String, Value> = serde_json::from_slice(&content)
            .map_err(|e| StorageError::corrupt(&self.path, format!("invalid JSON: {}", e)))?;

        let mut objects = BTreeMap::new();
        for (key, value) in table {
            let record = self.rebuild(&key, &value)?;
            if record.key() != key {
                return Err(StorageError::corrupt(
                    &self.path,
                    format!("{}: key does not match record {}", key, record.key()),
                ));
            }
            objects.insert(key, record);
        }

        info!(
            records = objects.len(),
            path = %self.path.display(),
            "storage reloaded"
        );
        self.objects = objects;
        Ok(())
    }

    fn rebuild(&self, key: &str, value: &Value) -> StorageResult<Record> {
        let fields = value
            .as_object()
            .ok_or_else(|| StorageError::corrupt(&self.path, format!("{}: not an object", key)))?;

        let class_name = fields
            .get(CLASS_FIELD)
            .and_then(Value::as_str)
            .ok_or_else(|| {
                StorageError::corrupt(&self.path, format!("{}: missing {}", key, CLASS_FIELD))
            })?;

        let class = ClassName::lookup(class_name).ok_or_else(|| {
            StorageError::corrupt(&self.path, format!("{}: unknown class {}", key, class_name))
        })?;

        Record::reconstruct(class, fields)
            .map_err(|e| StorageError::corrupt(&self.path, format!("{}: {}", key, e)))
    }

    /// Every class the registry knows.
    pub fn known_classes(&self) -> &'static [ClassName] {
        &ClassName::ALL
    }

    /// Declared coercions for `class_name`; empty for unknown classes.
    pub fn field_coercions(&self, class_name: &str) -> &'static [(&'static str, Coercion)] {
        ClassName::lookup(class_name)
            .map(|class| class.coercions())
            .unwrap_or(&[])
    }
}
