//! FILENAME: tabular/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FrameError {
    #[error("column not found: {0}")]
    MissingColumn(String),

    #[error("column `{name}` is {actual}, expected {expected}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("column `{name}` has {actual} rows, expected {expected}")]
    LengthMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("month out of range: {0} (expected 1..=12)")]
    MonthOutOfRange(i64),
}
