//! CSV source reading and header inspection.

mod header;
mod reader;

pub use header::{ColumnStatus, HeaderColumn, inspect_headers};
pub use reader::{CsvSource, Rows, validate_encoding};
