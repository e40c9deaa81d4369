//! Row and cell value types
//!
//! Rows are plain owned values. Once a row has been handed to a logger it is
//! shared behind an `Arc` and never mutated again, so these types carry no
//! interior mutability.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::codec;

/// A single scalar value inside a row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    /// Numeric cell, rendered in shortest round-trip decimal form
    Number(f64),
    /// Text cell, rendered verbatim
    Text(String),
}

impl Cell {
    /// Numeric value of the cell, if it holds a number
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            Cell::Text(_) => None,
        }
    }

    /// Text value of the cell, if it holds text
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Cell::Number(_) => None,
            Cell::Text(s) => Some(s),
        }
    }

    /// Check whether this cell holds a number
    pub fn is_number(&self) -> bool {
        matches!(self, Cell::Number(_))
    }

    /// Convert a JSON value into a cell.
    ///
    /// Numbers and strings map directly; anything else (booleans, arrays,
    /// objects, null) becomes text holding its compact JSON form.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Number(n) => n
                .as_f64()
                .map(Cell::Number)
                .unwrap_or_else(|| Cell::Text(n.to_string())),
            Value::String(s) => Cell::Text(s.clone()),
            other => Cell::Text(other.to_string()),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Number(n) => write!(f, "{}", n),
            Cell::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Self {
        Cell::Number(n)
    }
}

impl From<f32> for Cell {
    fn from(n: f32) -> Self {
        Cell::Number(f64::from(n))
    }
}

impl From<i32> for Cell {
    fn from(n: i32) -> Self {
        Cell::Number(f64::from(n))
    }
}

impl From<u32> for Cell {
    fn from(n: u32) -> Self {
        Cell::Number(f64::from(n))
    }
}

impl From<i64> for Cell {
    fn from(n: i64) -> Self {
        Cell::Number(n as f64)
    }
}

impl From<u64> for Cell {
    fn from(n: u64) -> Self {
        Cell::Number(n as f64)
    }
}

impl From<usize> for Cell {
    fn from(n: usize) -> Self {
        Cell::Number(n as f64)
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl From<&String> for Cell {
    fn from(s: &String) -> Self {
        Cell::Text(s.clone())
    }
}

/// One logged record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Row {
    /// Ordered sequence of cells, the tabular case
    Cells(Vec<Cell>),
    /// A bare number or string
    Scalar(Cell),
    /// Any other JSON value
    Structured(Value),
}

impl Row {
    /// Build a tabular row from anything convertible into cells
    pub fn cells<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Cell>,
    {
        Row::Cells(values.into_iter().map(Into::into).collect())
    }

    /// Build a bare scalar row
    pub fn scalar(value: impl Into<Cell>) -> Self {
        Row::Scalar(value.into())
    }

    /// Build a structured row from a JSON value
    pub fn structured(value: Value) -> Self {
        Row::Structured(value)
    }

    /// Cells of a tabular row
    pub fn as_cells(&self) -> Option<&[Cell]> {
        match self {
            Row::Cells(cells) => Some(cells),
            _ => None,
        }
    }

    /// Cell at a column position, for tabular rows only
    pub fn get(&self, column: usize) -> Option<&Cell> {
        self.as_cells().and_then(|cells| cells.get(column))
    }

    /// Number of cells in a tabular row; zero for other row kinds
    pub fn width(&self) -> usize {
        self.as_cells().map_or(0, <[Cell]>::len)
    }

    /// Check whether this row survives a trip through the line codec unchanged.
    ///
    /// Single-cell rows, cells containing commas or newlines, text that looks
    /// numeric, and a first cell starting with a JSON opener all decode to
    /// something else.
    pub fn is_line_safe(&self) -> bool {
        codec::round_trips(self)
    }
}

impl<T: Into<Cell>> From<Vec<T>> for Row {
    fn from(values: Vec<T>) -> Self {
        Row::cells(values)
    }
}

impl<T: Into<Cell>, const N: usize> From<[T; N]> for Row {
    fn from(values: [T; N]) -> Self {
        Row::cells(values)
    }
}

impl From<Value> for Row {
    fn from(value: Value) -> Self {
        Row::Structured(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cell_display() {
        assert_eq!(Cell::from(6).to_string(), "6");
        assert_eq!(Cell::from(0.5).to_string(), "0.5");
        assert_eq!(Cell::from(-3).to_string(), "-3");
        assert_eq!(Cell::from("abc").to_string(), "abc");
    }

    #[test]
    fn test_cell_accessors() {
        let n = Cell::from(42);
        assert!(n.is_number());
        assert_eq!(n.as_f64(), Some(42.0));
        assert_eq!(n.as_str(), None);

        let t = Cell::from("x");
        assert!(!t.is_number());
        assert_eq!(t.as_f64(), None);
        assert_eq!(t.as_str(), Some("x"));
    }

    #[test]
    fn test_cell_from_json() {
        assert_eq!(Cell::from_json(&json!(7)), Cell::Number(7.0));
        assert_eq!(Cell::from_json(&json!(2.5)), Cell::Number(2.5));
        assert_eq!(Cell::from_json(&json!("hi")), Cell::Text("hi".into()));
        assert_eq!(Cell::from_json(&json!(true)), Cell::Text("true".into()));
        assert_eq!(Cell::from_json(&json!([1, 2])), Cell::Text("[1,2]".into()));
    }

    #[test]
    fn test_row_constructors() {
        let a = Row::from([1, 2, 3]);
        let b = Row::from(vec![1.0, 2.0, 3.0]);
        let c = Row::cells([Cell::Number(1.0), Cell::Number(2.0), Cell::Number(3.0)]);
        assert_eq!(a, b);
        assert_eq!(b, c);
        assert_eq!(a.width(), 3);

        assert_eq!(Row::scalar("x"), Row::Scalar(Cell::Text("x".into())));
        assert_eq!(Row::from(json!({"a": 1})).width(), 0);
    }

    #[test]
    fn test_row_get() {
        let row = Row::from(["a", "b"]);
        assert_eq!(row.get(1), Some(&Cell::Text("b".into())));
        assert_eq!(row.get(2), None);
        assert_eq!(Row::scalar(5).get(0), None);
    }

    #[test]
    fn test_line_safety() {
        assert!(Row::from([1, 2, 3]).is_line_safe());
        assert!(Row::from(["a", "b"]).is_line_safe());
        assert!(Row::from(json!({"a": [1, 2]})).is_line_safe());
        assert!(Row::scalar("hello").is_line_safe());
        assert!(Row::from(["-inf", "x"]).is_line_safe());

        // Single cell decodes as a bare scalar
        assert!(!Row::from([1]).is_line_safe());
        // Embedded comma splits the cell
        assert!(!Row::from(["a,b", "c"]).is_line_safe());
        // Numeric-looking text comes back as a number
        assert!(!Row::from(["5", "c"]).is_line_safe());
        // Infinite numbers render as text that stays text
        assert!(!Row::from(vec![f64::NEG_INFINITY, 1.0]).is_line_safe());
        // Embedded newline splits the line
        assert!(!Row::scalar("two\nlines").is_line_safe());
    }
}
