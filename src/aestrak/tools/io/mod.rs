//! Adapters for the file system: spreadsheet input, input discovery, and SQL
//! output.

pub mod discover;
pub mod excel_read;
pub mod sql_write;
