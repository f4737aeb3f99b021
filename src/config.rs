use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::storage::{FileStorage, GOALS_KEY, TASKS_KEY};

pub const CONFIG_VERSION: u64 = 1;

const APP_DIR: &str = "almanac";
const CONFIG_FILE: &str = "config.json";

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("~/.local/share"))
        .join(APP_DIR)
}

fn default_preview_limit() -> usize {
    2
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub version: u64,
    pub data_directory: PathBuf,
    pub debug_logging: bool,
    /// Tasks shown per calendar cell before "+ N more".
    pub preview_limit: usize,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            data_directory: default_data_dir(),
            debug_logging: false,
            preview_limit: default_preview_limit(),
        }
    }
}

impl PlannerConfig {
    /// `<config_dir>/almanac/config.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Reads a config file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads from the default location, falling back to defaults on any error.
    pub fn load_or_default() -> Self {
        let Some(path) = Self::default_path() else {
            return Self::default();
        };
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!("Using default config: {}", e);
            Self::default()
        })
    }

    pub fn storage(&self) -> FileStorage {
        FileStorage::new(&self.data_directory)
    }

    pub fn events_path(&self) -> PathBuf {
        self.storage().path_for(TASKS_KEY)
    }

    pub fn month_todos_path(&self) -> PathBuf {
        self.storage().path_for(GOALS_KEY)
    }
}
