//! # Rowlog Core
//!
//! Row data model and line codec shared by every rowlog storage backend.
//!
//! A [`Row`] is one logged record: an ordered sequence of [`Cell`]s, a bare
//! scalar, or an arbitrary JSON value. The [`codec`] module turns a row into
//! a single newline-terminated line of text and back again. Both the memory
//! and the file backend render rows through the same codec, so a log's text
//! form does not depend on where it was stored.
//!
//! ## Example
//!
//! ```rust
//! use rowlog_core::{Row, codec};
//!
//! let row = Row::from([1, 2, 3]);
//! let line = codec::stringify(&row);
//! assert_eq!(line, "1,2,3\n");
//!
//! let back = codec::parse_line(line.trim_end_matches('\n')).unwrap();
//! assert_eq!(back, row);
//! ```

pub mod codec;
pub mod error;
pub mod row;

// Re-export main types
pub use codec::{encode_rows, parse_line, stringify};
pub use error::CodecError;
pub use row::{Cell, Row};
