//! FILENAME: series-engine/src/lib.rs
//! Time Aggregator for the indicator dashboard.
//!
//! This crate collapses raw per-month records into chronologically indexed
//! series and derives the variation metrics behind every KPI card and
//! combo chart. It depends on `tabular` only for shared types (Frame,
//! YearMonth, FrameError).
//!
//! Layers:
//! - `aggregate`: Frame -> MonthlySeries (grouping and ordering)
//! - `variation`: YoY, accumulations, rolling comparisons

pub mod aggregate;
pub mod variation;

pub use aggregate::{aggregate_monthly, latest_period, MonthlySeries, SeriesPoint};
pub use variation::{AccumulatedPoint, VariationMode};
