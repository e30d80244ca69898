//! FILENAME: tabular/src/lib.rs
//! PURPOSE: Main library entry point for the shared tabular layer.
//! CONTEXT: Re-exports the frame schema, calendar types, Brazilian-locale
//! number formatting, and the TTL memoization utility used by the
//! series and pivot engines.

pub mod calendar;
pub mod error;
pub mod frame;
pub mod memo;
pub mod number_format;

// Re-export commonly used types at the crate root
pub use calendar::{month_abbrev, month_name, YearMonth, MONTH_NAMES};
pub use error::FrameError;
pub use frame::{Column, ColumnData, Frame, FrameBuilder, MONTH_COLUMN, YEAR_COLUMN};
pub use memo::{memo_key, MemoCache};
pub use number_format::{classify_sign, format_decimal, format_percent, Sign, PLACEHOLDER};
