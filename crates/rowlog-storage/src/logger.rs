//! Tabular logger
//!
//! Provides [`Logger`], which owns a [`RowStore`] and an optional column
//! header, caches the last accepted row, and converts the whole log to and
//! from its text form.
//!
//! Rows are handed over by value and kept behind `Arc`. After a write, the
//! logger and its store hold the only references, so nothing can change a
//! row once it has been logged.

use std::path::Path;
use std::sync::Arc;

use rowlog_core::{Cell, Row, parse_line};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, instrument, trace, warn};

use crate::RowStore;
use crate::config::{LoggerConfig, StoreMode};
use crate::error::LogError;
use crate::memory::MemoryRowStore;
use crate::persistent::FileRowStore;

/// Append-only tabular logger
///
/// A logger has exactly one writer. Every mutating method takes `&mut self`,
/// so sharing one logger between tasks needs an external lock.
pub struct Logger {
    /// Log name, the file path in file mode
    pub(crate) name: String,
    /// Storage backend
    pub(crate) store: Box<dyn RowStore>,
    /// Column names, once set
    pub(crate) header: Option<Vec<String>>,
    /// Index of the first data row after the header in the store
    pub(crate) data_start: usize,
    /// Most recently accepted row
    pub(crate) last: Option<Arc<Row>>,
    /// Rows accepted since creation or the last reload
    pub(crate) rows_written: u64,
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("mode", &self.store.mode())
            .field("header", &self.header)
            .field("rows_written", &self.rows_written)
            .finish_non_exhaustive()
    }
}

impl Logger {
    /// Create a logger from configuration
    #[instrument(skip_all, fields(name = %config.name, mode = ?config.mode))]
    pub async fn new(config: LoggerConfig) -> Result<Self, LogError> {
        let store: Box<dyn RowStore> = match config.mode {
            StoreMode::Memory => Box::new(MemoryRowStore::new()),
            StoreMode::File => Box::new(
                FileRowStore::with_options(
                    config.path(),
                    config.sync_on_write,
                    config.create_parent_dirs,
                )
                .await?,
            ),
        };
        Ok(Self::with_store(config.name, store))
    }

    /// Create an in-memory logger
    pub fn in_memory(name: impl Into<String>) -> Self {
        Self::with_store(name, Box::new(MemoryRowStore::new()))
    }

    /// Create a file-backed logger, truncating any existing file at `path`
    pub async fn open_file(path: impl AsRef<Path>) -> Result<Self, LogError> {
        Self::new(LoggerConfig::file(path.as_ref())).await
    }

    /// Create a logger over an injected store
    pub fn with_store(name: impl Into<String>, store: Box<dyn RowStore>) -> Self {
        let name = name.into();
        debug!(name = %name, mode = ?store.mode(), "Created logger");
        Self {
            name,
            store,
            header: None,
            data_start: 0,
            last: None,
            rows_written: 0,
        }
    }

    /// Try the file backend at `path`, falling back to memory if it cannot
    /// be opened.
    ///
    /// This is the only constructor that picks a backend on its own, and the
    /// open failure is the only error anywhere in the crate that is logged
    /// and dropped instead of returned. Use [`Logger::new`] or
    /// [`Logger::open_file`] to see the error.
    pub async fn open_or_memory(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::open_file(path).await {
            Ok(logger) => logger,
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "Cannot open log file, falling back to memory"
                );
                Self::in_memory(path.to_string_lossy())
            }
        }
    }

    /// Log name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Backend kind
    pub fn mode(&self) -> StoreMode {
        self.store.mode()
    }

    /// Column names, if a header has been set
    pub fn header(&self) -> Option<&[String]> {
        self.header.as_deref()
    }

    /// Most recently accepted row
    pub fn last(&self) -> Option<&Row> {
        self.last.as_deref()
    }

    /// Rows accepted so far, header included
    pub fn rows_written(&self) -> u64 {
        self.rows_written
    }

    /// Stored rows in insertion order; `None` in file mode
    pub fn rows(&self) -> Option<&[Arc<Row>]> {
        self.store.rows()
    }

    /// Check whether the backing storage is present
    pub async fn exists(&self) -> Result<bool, LogError> {
        self.store.exists().await
    }

    /// Set the column header and write it as a row
    ///
    /// The header goes through the normal write path, so it becomes
    /// [`last`](Self::last) and counts as a row.
    pub async fn set_header<I, S>(&mut self, columns: I) -> Result<&mut Self, LogError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        self.write(Row::cells(columns.iter())).await?;

        debug!(log = %self.name, columns = columns.len(), "Set header");
        self.header = Some(columns);
        self.data_start = self.rows_written as usize;
        Ok(self)
    }

    /// Write a row
    ///
    /// An absent row (`None`) is rejected with [`LogError::InvalidRow`]. The
    /// row only becomes [`last`](Self::last) after the store accepted it, so
    /// a failed write leaves the logger unchanged.
    ///
    /// A synced file store that fails to persist a row closes its file, so
    /// the rejected row never lands on disk and later writes fail with
    /// [`LogError::BackendIo`]. Without sync, rows are only buffered and an
    /// I/O error surfaces on the flush in [`to_text`](Self::to_text) or
    /// [`close`](Self::close).
    pub async fn write(&mut self, row: impl Into<Option<Row>>) -> Result<&mut Self, LogError> {
        let row = row
            .into()
            .ok_or_else(|| LogError::invalid_row("cannot write an absent row"))?;

        let row = Arc::new(row);
        self.store.append(Arc::clone(&row)).await?;
        self.last = Some(row);
        self.rows_written += 1;

        trace!(log = %self.name, rows = self.rows_written, "Wrote row");
        Ok(self)
    }

    /// Write the fields of `record` in header order
    ///
    /// `record` must serialize to a map. Header columns it lacks, or holds as
    /// `null`, are written as `filler`. Fields that are not header columns
    /// are dropped.
    pub async fn submit<T>(&mut self, record: &T, filler: impl Into<Cell>) -> Result<(), LogError>
    where
        T: Serialize + ?Sized,
    {
        let header = self.header.as_ref().ok_or(LogError::MissingHeader)?;

        let value =
            serde_json::to_value(record).map_err(|e| LogError::invalid_row(e.to_string()))?;
        let Value::Object(fields) = value else {
            return Err(LogError::invalid_row(
                "submitted record must serialize to a map",
            ));
        };

        let filler = filler.into();
        let cells: Vec<Cell> = header
            .iter()
            .map(|column| match fields.get(column) {
                None | Some(Value::Null) => filler.clone(),
                Some(value) => Cell::from_json(value),
            })
            .collect();

        self.write(Row::Cells(cells)).await?;
        Ok(())
    }

    /// Value of column `key` in the last row
    ///
    /// # Errors
    ///
    /// [`LogError::MissingHeader`] without a header, and
    /// [`LogError::UnknownColumn`] when `key` is not in it. Returns `Ok(None)`
    /// when nothing has been written or the last row has no such cell.
    pub fn last_by_key(&self, key: &str) -> Result<Option<&Cell>, LogError> {
        let column = self.column_index(key)?;
        Ok(self.last.as_deref().and_then(|row| row.get(column)))
    }

    /// Header position of a column
    pub(crate) fn column_index(&self, key: &str) -> Result<usize, LogError> {
        let header = self
            .header
            .as_deref()
            .filter(|h| !h.is_empty())
            .ok_or(LogError::MissingHeader)?;
        header
            .iter()
            .position(|c| c == key)
            .ok_or_else(|| LogError::unknown_column(key))
    }

    /// The header as a row, if set
    pub(crate) fn header_row(&self) -> Option<Row> {
        self.header.as_ref().map(|h| Row::cells(h.iter()))
    }

    /// Full text of the log, one line per row
    ///
    /// In file mode pending writes are flushed and the file is read back.
    pub async fn to_text(&mut self) -> Result<String, LogError> {
        self.store.read_all().await
    }

    /// Replace the contents of a fresh log with `text`
    ///
    /// This is the inverse of [`to_text`](Self::to_text). If a header was
    /// set, the first line of `text` becomes the new header. Every other line
    /// is decoded with the line codec and written in order.
    ///
    /// # Errors
    ///
    /// Fails with [`LogError::NonEmptyLog`] if more than one row (more than
    /// just a header) has been written, and with [`LogError::Codec`] if a line
    /// cannot be decoded. In both cases the log is left untouched.
    pub async fn from_text(&mut self, text: &str) -> Result<&mut Self, LogError> {
        // An injected store may hold rows this logger never wrote
        let held = self
            .store
            .rows()
            .map_or(self.rows_written, |rows| rows.len() as u64);
        if held > 1 {
            return Err(LogError::NonEmptyLog { rows: held });
        }

        let (columns, body) = match self.header {
            Some(_) => {
                let (first, rest) = text.split_once('\n').unwrap_or((text, ""));
                (Some(first.split(',').map(str::to_string).collect::<Vec<_>>()), rest)
            }
            None => (None, text),
        };

        let rows = body
            .split_terminator('\n')
            .map(parse_line)
            .collect::<Result<Vec<_>, _>>()?;

        self.store.clear().await?;
        self.last = None;
        self.rows_written = 0;
        self.data_start = 0;

        if let Some(columns) = columns {
            self.set_header(columns).await?;
        }
        for row in rows {
            self.write(row).await?;
        }

        info!(log = %self.name, rows = self.rows_written, "Loaded log from text");
        Ok(self)
    }

    /// Flush and release the backend
    ///
    /// Dropping a logger does not flush it. File-mode writes after `close`
    /// fail with [`LogError::BackendIo`].
    pub async fn close(&mut self) -> Result<(), LogError> {
        self.store.close().await
    }
}
