//! Row-by-row export of in-memory logs
//!
//! [`RowChunks`] yields the encoded text of one row at a time, in order, and
//! can be rewound to the first row. A stream adapter can pull from it lazily
//! instead of building the whole text with [`Logger::to_text`].

use std::iter::FusedIterator;
use std::sync::Arc;

use rowlog_core::{Row, stringify};

use crate::error::LogError;
use crate::logger::Logger;

/// Restartable cursor over the encoded rows of a memory-backed log
#[derive(Debug, Clone)]
pub struct RowChunks<'a> {
    rows: &'a [Arc<Row>],
    next: usize,
}

impl<'a> RowChunks<'a> {
    fn new(rows: &'a [Arc<Row>]) -> Self {
        Self { rows, next: 0 }
    }

    /// Start again from the first row
    pub fn rewind(&mut self) {
        self.next = 0;
    }

    /// Number of rows not yet yielded
    pub fn remaining(&self) -> usize {
        self.rows.len() - self.next
    }

    /// Check whether every row has been yielded
    pub fn is_exhausted(&self) -> bool {
        self.next >= self.rows.len()
    }
}

impl Iterator for RowChunks<'_> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.rows.get(self.next)?;
        self.next += 1;
        Some(stringify(row))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }
}

impl ExactSizeIterator for RowChunks<'_> {}

impl FusedIterator for RowChunks<'_> {}

impl Logger {
    /// Cursor over the encoded rows, one line per item
    ///
    /// # Errors
    ///
    /// [`LogError::UnsupportedMode`] in file mode; read the file with
    /// [`Logger::to_text`] instead.
    pub fn export(&self) -> Result<RowChunks<'_>, LogError> {
        self.store
            .rows()
            .map(RowChunks::new)
            .ok_or(LogError::UnsupportedMode("export requires the memory backend"))
    }

    /// Encoded text of row `index`, or `None` past the end or in file mode
    pub fn encoded_row(&self, index: usize) -> Option<String> {
        self.store
            .rows()
            .and_then(|rows| rows.get(index))
            .map(|row| stringify(row))
    }

    /// Number of rows held in memory; zero in file mode
    pub fn row_count(&self) -> usize {
        self.store.rows().map_or(0, <[Arc<Row>]>::len)
    }
}
