//! Line codec
//!
//! Every row is stored as exactly one newline-terminated line of text:
//!
//! ```text
//! 1,2,3          <- Row::Cells, comma-joined
//! hello          <- Row::Scalar, bare text
//! {"a":1}        <- Row::Structured, compact JSON
//! ```
//!
//! Decoding looks at the first character of the line. `{`, `"` and `[` mean
//! JSON; otherwise a comma means cells; otherwise the line is a bare text
//! scalar. A cell field decodes as a number only if re-encoding that number
//! reproduces the field text exactly, so decoding never rewrites what was
//! stored.

use std::borrow::Borrow;
use std::fmt::Write;

use crate::error::CodecError;
use crate::row::{Cell, Row};

/// Encode a row as one line of text, including the trailing newline
pub fn stringify(row: &Row) -> String {
    let mut line = String::new();
    write_row(&mut line, row);
    line
}

/// Encode a sequence of rows, one line per row, in order
pub fn encode_rows<I>(rows: I) -> String
where
    I: IntoIterator,
    I::Item: Borrow<Row>,
{
    let mut text = String::new();
    for row in rows {
        write_row(&mut text, row.borrow());
    }
    text
}

fn write_row(out: &mut String, row: &Row) {
    // Writing into a String cannot fail
    match row {
        Row::Cells(cells) => {
            for (i, cell) in cells.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                let _ = write!(out, "{}", cell);
            }
        }
        Row::Scalar(cell) => {
            let _ = write!(out, "{}", cell);
        }
        Row::Structured(value) => {
            let _ = write!(out, "{}", value);
        }
    }
    out.push('\n');
}

/// Decode one line of text (without its trailing newline) into a row
pub fn parse_line(line: &str) -> Result<Row, CodecError> {
    match line.chars().next() {
        Some('{' | '"' | '[') => Ok(Row::Structured(serde_json::from_str(line)?)),
        _ if line.contains(',') => Ok(Row::Cells(line.split(',').map(decode_field).collect())),
        _ => Ok(Row::Scalar(Cell::Text(line.to_string()))),
    }
}

/// Decode a single comma-separated field
fn decode_field(field: &str) -> Cell {
    let numeric_start = field
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit() || matches!(c, '-' | '+' | '.'));

    if numeric_start
        && let Ok(n) = field.parse::<f64>()
        && n.is_finite()
        && n.to_string() == field
    {
        return Cell::Number(n);
    }

    Cell::Text(field.to_string())
}

/// Check that a row decodes back to itself from its own single line
pub(crate) fn round_trips(row: &Row) -> bool {
    let line = stringify(row);
    let body = &line[..line.len() - 1];
    !body.contains('\n') && parse_line(body).is_ok_and(|decoded| decoded == *row)
}
