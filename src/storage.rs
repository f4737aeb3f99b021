//! Persistence capability: whole JSON documents stored under fixed keys.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Key of the day-task document.
pub const TASKS_KEY: &str = "planner_events";
/// Key of the month-goal document.
pub const GOALS_KEY: &str = "planner_month_todos";

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to access `{key}`: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode `{key}`: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to decode `{key}`: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Key-value store holding raw JSON text.
pub trait Storage {
    /// `Ok(None)` when nothing is stored under `key`.
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn save(&self, key: &str, json: &str) -> Result<(), StorageError>;
}

/// One `<key>.json` file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn save(&self, key: &str, json: &str) -> Result<(), StorageError> {
        let io_err = |source| StorageError::Io {
            key: key.to_string(),
            source,
        };
        std::fs::create_dir_all(&self.dir).map_err(io_err)?;
        std::fs::write(self.path_for(key), json).map_err(io_err)
    }
}

/// In-process storage for tests and embedding hosts.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(self, key: &str, json: &str) -> Self {
        self.entries.borrow_mut().insert(key.to_string(), json.to_string());
        self
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl Storage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.get(key))
    }

    fn save(&self, key: &str, json: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().insert(key.to_string(), json.to_string());
        Ok(())
    }
}

/// Reads and decodes the document under `key`. `Ok(None)` when absent.
pub fn read_document<T: DeserializeOwned>(
    storage: &dyn Storage,
    key: &str,
) -> Result<Option<T>, StorageError> {
    let Some(json) = storage.load(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&json)
        .map(Some)
        .map_err(|source| StorageError::Decode {
            key: key.to_string(),
            source,
        })
}

/// Start-up load: falls back to the default value when the document is
/// missing or unreadable.
pub fn load_or_default<T: DeserializeOwned + Default>(storage: &dyn Storage, key: &str) -> T {
    match read_document(storage, key) {
        Ok(Some(value)) => value,
        Ok(None) => {
            log::debug!("No stored document for {}, starting empty", key);
            T::default()
        }
        Err(e) => {
            log::warn!("Discarding unreadable document: {}", e);
            T::default()
        }
    }
}

pub fn write_document<T: Serialize>(
    storage: &dyn Storage,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let json = serde_json::to_string_pretty(value).map_err(|source| StorageError::Encode {
        key: key.to_string(),
        source,
    })?;
    storage.save(key, &json)
}

/// Fire-and-forget save: failures are logged and otherwise ignored.
pub fn save_document<T: Serialize>(storage: &dyn Storage, key: &str, value: &T) {
    if let Err(e) = write_document(storage, key, value) {
        log::error!("Failed to save {}: {}", key, e);
    }
}
