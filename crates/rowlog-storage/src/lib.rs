//! # Rowlog Storage
//!
//! Append-only tabular logging with pluggable storage backends.
//!
//! A [`Logger`] writes rows through a [`RowStore`]. Two stores ship with the
//! crate and the backend is always chosen explicitly at construction:
//!
//! - **MemoryRowStore**: keeps every row in order, supports range queries and
//!   row-by-row export
//! - **FileRowStore**: streams each row as a line to an append-only file and
//!   keeps only the last row in memory
//!
//! Both render rows with the line codec from `rowlog-core`, so the text of a
//! log is the same whichever backend produced it.
//!
//! ## Example
//!
//! ```rust,ignore
//! use rowlog_storage::Logger;
//! use rowlog_core::Row;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), rowlog_storage::LogError> {
//!     let mut log = Logger::in_memory("prices");
//!     log.set_header(["t", "price"]).await?;
//!     for t in 0..10 {
//!         log.write(Row::from([t, 100 + t])).await?;
//!     }
//!
//!     // Rows with 3 <= t <= 5, header first
//!     let rows = log.select_ascending("t", 3.0, 5.0)?;
//!     assert_eq!(rows.len(), 4);
//!
//!     assert_eq!(log.last_by_key("price")?.and_then(|c| c.as_f64()), Some(109.0));
//!     Ok(())
//! }
//! ```

pub mod bisect;
pub mod config;
pub mod error;
pub mod export;
pub mod logger;
pub mod memory;
pub mod persistent;
mod select;

// Re-exports
pub use config::{LoggerConfig, StoreMode};
pub use error::LogError;
pub use export::RowChunks;
pub use logger::Logger;
pub use memory::MemoryRowStore;
pub use persistent::FileRowStore;

// Re-export the row model for convenience
pub use rowlog_core::{Cell, Row};

use std::sync::Arc;

use async_trait::async_trait;

/// Storage backend for a logger
///
/// A store only ever grows by `append`. The one exception is `clear`, which
/// the logger calls when it replaces a fresh log wholesale from text.
///
/// Stores hold the rows they are given behind `Arc`, so a row cannot be
/// changed once it has been appended.
#[async_trait]
pub trait RowStore: Send + Sync {
    /// Backend kind of this store
    fn mode(&self) -> StoreMode;

    /// Append a row at the end of the store
    ///
    /// # Errors
    ///
    /// Returns [`LogError::BackendIo`] if the row could not be persisted.
    async fn append(&mut self, row: Arc<Row>) -> Result<(), LogError>;

    /// Read back the full text of every row appended so far
    ///
    /// File stores flush pending writes first, so the returned text always
    /// reflects every completed append.
    async fn read_all(&mut self) -> Result<String, LogError>;

    /// Check whether the backing storage is present
    ///
    /// A failure to inspect the storage is an error, not `false`.
    async fn exists(&self) -> Result<bool, LogError>;

    /// In-memory rows, in insertion order
    ///
    /// Returns `None` for stores that do not keep rows in memory.
    fn rows(&self) -> Option<&[Arc<Row>]> {
        None
    }

    /// Drop every row and start over empty
    async fn clear(&mut self) -> Result<(), LogError>;

    /// Flush and release any held resources
    async fn close(&mut self) -> Result<(), LogError>;
}
