//! File-backed row store
//!
//! Streams every row as one line of text to an append-only file. The file is
//! created (or truncated) when the store is opened and stays open until
//! [`RowStore::close`] is called. No rows are kept in memory.

use std::io::SeekFrom;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use rowlog_core::{Row, stringify};
use tokio::fs::{File, OpenOptions};
use tokio::io::{AsyncSeekExt, AsyncWriteExt, BufWriter};
use tracing::{debug, info, trace, warn};

use crate::RowStore;
use crate::config::StoreMode;
use crate::error::LogError;

/// Persistent implementation of RowStore
#[derive(Debug)]
pub struct FileRowStore {
    /// Path to the log file
    path: PathBuf,
    /// Write handle, `None` once closed
    writer: Option<BufWriter<File>>,
    /// Whether to sync writes immediately (durability vs performance)
    sync_on_write: bool,
    /// Bytes appended since the file was opened or last cleared
    bytes_written: u64,
}

impl FileRowStore {
    /// Create a store at the given path, truncating any existing file
    pub async fn create(path: impl AsRef<Path>) -> Result<Self, LogError> {
        Self::with_options(path, true, false).await
    }

    /// Create with explicit sync and directory options
    pub async fn with_options(
        path: impl AsRef<Path>,
        sync_on_write: bool,
        create_parent_dirs: bool,
    ) -> Result<Self, LogError> {
        let path = path.as_ref().to_path_buf();

        if create_parent_dirs
            && let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)
            .await?;

        info!(path = %path.display(), sync_on_write, "Opened row log file");

        Ok(Self {
            path,
            writer: Some(BufWriter::new(file)),
            sync_on_write,
            bytes_written: 0,
        })
    }

    /// Path of the log file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Bytes appended since the file was opened or last cleared
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Check whether the write handle is still open
    pub fn is_open(&self) -> bool {
        self.writer.is_some()
    }

    fn writer_mut(&mut self) -> Result<&mut BufWriter<File>, LogError> {
        self.writer
            .as_mut()
            .ok_or_else(|| LogError::io("log file not open"))
    }
}

/// Buffer one encoded row, pushing it to disk when `sync` is set
async fn write_line(writer: &mut BufWriter<File>, line: &[u8], sync: bool) -> std::io::Result<()> {
    writer.write_all(line).await?;
    if sync {
        writer.flush().await?;
        writer.get_ref().sync_data().await?;
    }
    Ok(())
}

#[async_trait]
impl RowStore for FileRowStore {
    fn mode(&self) -> StoreMode {
        StoreMode::File
    }

    async fn append(&mut self, row: Arc<Row>) -> Result<(), LogError> {
        let line = stringify(&row);
        let sync = self.sync_on_write;

        if let Err(e) = write_line(self.writer_mut()?, line.as_bytes(), sync).await {
            if sync {
                // The buffer holds only the rejected row; dropping the writer
                // keeps it from reaching the file on a later flush.
                self.writer = None;
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Synced append failed, closed row log file"
                );
            }
            return Err(e.into());
        }

        self.bytes_written += line.len() as u64;
        trace!(bytes = line.len(), total = self.bytes_written, "Appended row to file");
        Ok(())
    }

    async fn read_all(&mut self) -> Result<String, LogError> {
        if let Some(writer) = self.writer.as_mut() {
            writer.flush().await?;
        }
        let text = tokio::fs::read_to_string(&self.path).await?;
        debug!(path = %self.path.display(), bytes = text.len(), "Read back row log");
        Ok(text)
    }

    async fn exists(&self) -> Result<bool, LogError> {
        Ok(tokio::fs::try_exists(&self.path).await?)
    }

    async fn clear(&mut self) -> Result<(), LogError> {
        let writer = self.writer_mut()?;
        writer.flush().await?;
        writer.get_mut().set_len(0).await?;
        writer.seek(SeekFrom::Start(0)).await?;

        warn!(path = %self.path.display(), "Truncated row log file");
        self.bytes_written = 0;
        Ok(())
    }

    async fn close(&mut self) -> Result<(), LogError> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush().await?;
            writer.get_ref().sync_all().await?;
            debug!(path = %self.path.display(), "Closed row log file");
        }
        Ok(())
    }
}
