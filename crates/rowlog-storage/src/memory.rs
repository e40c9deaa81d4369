//! In-memory row store
//!
//! Keeps every appended row in insertion order. This is the backend for
//! tests, simulations and anything that needs range queries.

use std::sync::Arc;

use async_trait::async_trait;
use rowlog_core::{Row, encode_rows};
use tracing::trace;

use crate::RowStore;
use crate::config::StoreMode;
use crate::error::LogError;

/// In-memory implementation of RowStore
#[derive(Debug, Default)]
pub struct MemoryRowStore {
    /// Rows in insertion order
    rows: Vec<Arc<Row>>,
}

impl MemoryRowStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Number of stored rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the store holds no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[async_trait]
impl RowStore for MemoryRowStore {
    fn mode(&self) -> StoreMode {
        StoreMode::Memory
    }

    async fn append(&mut self, row: Arc<Row>) -> Result<(), LogError> {
        self.rows.push(row);
        trace!(rows = self.rows.len(), "Appended row to memory store");
        Ok(())
    }

    async fn read_all(&mut self) -> Result<String, LogError> {
        Ok(encode_rows(self.rows.iter().map(Arc::as_ref)))
    }

    async fn exists(&self) -> Result<bool, LogError> {
        Ok(true)
    }

    fn rows(&self) -> Option<&[Arc<Row>]> {
        Some(&self.rows)
    }

    async fn clear(&mut self) -> Result<(), LogError> {
        self.rows.clear();
        Ok(())
    }

    async fn close(&mut self) -> Result<(), LogError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_append_and_read() {
        let mut store = MemoryRowStore::new();
        assert!(store.is_empty());

        store.append(Arc::new(Row::from([1, 2, 3]))).await.unwrap();
        store.append(Arc::new(Row::from([4, 5, 6]))).await.unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.read_all().await.unwrap(), "1,2,3\n4,5,6\n");
    }

    #[tokio::test]
    async fn test_rows_keep_order() {
        let mut store = MemoryRowStore::new();
        for i in 0..5 {
            store.append(Arc::new(Row::from([i, i * i]))).await.unwrap();
        }

        let rows = store.rows().unwrap();
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(**row, Row::from([i as i32, (i * i) as i32]));
        }
    }

    #[test]
    fn test_blocking_append_and_read() {
        let mut store = MemoryRowStore::new();
        tokio_test::block_on(store.append(Arc::new(Row::from([7, 8])))).unwrap();
        let text = tokio_test::block_on(store.read_all()).unwrap();
        assert_eq!(text, "7,8\n");
    }

    #[tokio::test]
    async fn test_clear() {
        let mut store = MemoryRowStore::new();
        store.append(Arc::new(Row::scalar("x"))).await.unwrap();
        store.clear().await.unwrap();

        assert!(store.is_empty());
        assert_eq!(store.read_all().await.unwrap(), "");
        assert!(store.exists().await.unwrap());
    }
}
