//! Range queries over a non-decreasing column

use std::cmp::Ordering;

use rowlog_core::Row;
use tracing::trace;

use crate::bisect;
use crate::error::LogError;
use crate::logger::Logger;

impl Logger {
    /// Rows whose `column` value lies in `[from, to]`, header first
    ///
    /// Requires the memory backend and a header. The column must hold
    /// numbers that never decrease from one data row to the next; this is
    /// not checked, and the search probes only O(log n) rows.
    ///
    /// Returns an empty `Vec` (no header row) when no row qualifies,
    /// including when the bounds lie entirely outside the logged values.
    ///
    /// # Errors
    ///
    /// Checked in this order: [`LogError::NonNumericBound`] for a NaN bound,
    /// [`LogError::InvalidRange`] when `to < from`,
    /// [`LogError::MissingHeader`], [`LogError::UnsupportedMode`] in file
    /// mode, [`LogError::UnknownColumn`]. A probed row without a numeric
    /// value in the column fails with [`LogError::NonNumericCell`].
    pub fn select_ascending(&self, column: &str, from: f64, to: f64) -> Result<Vec<Row>, LogError> {
        if from.is_nan() || to.is_nan() {
            return Err(LogError::NonNumericBound);
        }
        if to < from {
            return Err(LogError::InvalidRange { from, to });
        }
        if self.header.is_none() {
            return Err(LogError::MissingHeader);
        }
        let rows = self
            .store
            .rows()
            .ok_or(LogError::UnsupportedMode("select_ascending requires the memory backend"))?;
        let col = self.column_index(column)?;

        let found = bisect::zero_range::<LogError, _>(self.data_start, rows.len(), |i| {
            let value = rows[i]
                .get(col)
                .and_then(|cell| cell.as_f64())
                .filter(|v| !v.is_nan())
                .ok_or_else(|| LogError::NonNumericCell {
                    row: i,
                    column: column.to_string(),
                })?;

            Ok(if value < from {
                Ordering::Less
            } else if value > to {
                Ordering::Greater
            } else {
                Ordering::Equal
            })
        })?;

        let Some(range) = found else {
            trace!(column, from, to, "Selection is empty");
            return Ok(Vec::new());
        };

        let mut selected = Vec::with_capacity(range.len() + 1);
        selected.extend(self.header_row());
        selected.extend(rows[range].iter().map(|row| Row::clone(row)));

        trace!(column, from, to, rows = selected.len() - 1, "Selected rows");
        Ok(selected)
    }

    /// Rows whose `column` value equals `value`, header first
    pub fn select_at(&self, column: &str, value: f64) -> Result<Vec<Row>, LogError> {
        self.select_ascending(column, value, value)
    }
}
