//! FILENAME: pivot-engine/src/lib.rs
//! Pivot subsystem for the indicator dashboard.
//!
//! This crate reshapes long-form monthly records into category x period
//! tables (countries, product types, SH6 codes x years). It depends on
//! `tabular` only for shared types (Frame, YearMonth, FrameError).
//!
//! Layers:
//! - `definition`: Serializable configuration (what the pivot IS)
//! - `engine`: Calculation engine (HOW we calculate)
//! - `view`: Renderable output for the display layer (WHAT we show)

pub mod definition;
pub mod engine;
pub mod view;

pub use definition::{MetricMode, PeriodMode, PivotDefinition};
pub use engine::{build_pivot, PivotBuilder};
pub use view::{PivotRow, PivotView};
