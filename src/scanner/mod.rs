//! Input reading.
//!
//! This module provides raw row iteration over delimited text files and
//! single-column field extraction.

pub mod reader;

pub use reader::{split_field, RawRow, RowReader, DEFAULT_DELIMITER};
