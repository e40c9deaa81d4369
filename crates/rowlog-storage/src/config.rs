//! Logger configuration

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Which backend a logger writes through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreMode {
    /// Rows kept in an in-memory sequence
    #[default]
    Memory,
    /// Rows streamed to an append-only file
    File,
}

/// Configuration for constructing a [`Logger`](crate::Logger)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggerConfig {
    /// Log name; the file path in file mode, a diagnostic label in memory mode
    pub name: String,
    /// Backend selector
    pub mode: StoreMode,
    /// Flush and sync the file after every append
    pub sync_on_write: bool,
    /// Create missing parent directories of the log file
    pub create_parent_dirs: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            name: "rowlog".to_string(),
            mode: StoreMode::Memory,
            sync_on_write: true,
            create_parent_dirs: false,
        }
    }
}

impl LoggerConfig {
    /// Config for an in-memory logger
    pub fn memory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Config for a file-backed logger
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            name: path.into().to_string_lossy().into_owned(),
            mode: StoreMode::File,
            ..Default::default()
        }
    }

    /// Set whether each append is synced to disk
    pub fn with_sync_on_write(mut self, sync: bool) -> Self {
        self.sync_on_write = sync;
        self
    }

    /// Set whether missing parent directories are created
    pub fn with_parent_dirs(mut self, create: bool) -> Self {
        self.create_parent_dirs = create;
        self
    }

    /// Path of the log file in file mode
    pub fn path(&self) -> PathBuf {
        PathBuf::from(&self.name)
    }
}
