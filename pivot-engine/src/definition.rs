//! FILENAME: pivot-engine/src/definition.rs
//! Pivot Definition - The serializable configuration.
//!
//! This module contains the types needed to DESCRIBE a category x period
//! pivot. These structures are designed to be:
//! - Serializable (sent between the data-access layer and the renderer)
//! - Immutable snapshots of caller intent

use serde::{Deserialize, Serialize};
use tabular::YearMonth;

// ============================================================================
// MODES
// ============================================================================

/// Which slice of each year the aggregation covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PeriodMode {
    /// Only the reference month, across years ("Mai/24", "Mai/25", ...).
    #[default]
    SinglePeriod,
    /// January through the reference month, per year ("Jan-Mai/25", ...).
    YearToDate,
}

/// How cells are derived from the absolute aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MetricMode {
    /// Raw sums.
    #[default]
    Absolute,
    /// Each cell as a percentage of its column total.
    ShareOfTotal,
    /// Variation against the previous column; the first column is dropped.
    PeriodChange,
}

// ============================================================================
// MAIN DEFINITION STRUCT
// ============================================================================

/// The complete definition of a category x period pivot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PivotDefinition {
    /// Numeric column to aggregate (e.g. "valor", "pares",
    /// "saldo_movimentacao").
    pub value_column: String,

    /// Categorical column supplying the rows (e.g. "pais", "tipo", "sh6").
    pub group_column: String,

    /// Display label for the row dimension (e.g. "País", "Tipo", "SH6").
    pub row_label: String,

    pub period_mode: PeriodMode,

    pub metric_mode: MetricMode,

    /// Comparison anchor. Defaults to the latest (year, month) present in
    /// the frame at hand, so different category filters may resolve to
    /// different reference months.
    #[serde(default)]
    pub reference: Option<YearMonth>,
}

impl PivotDefinition {
    pub fn new(value_column: impl Into<String>, group_column: impl Into<String>) -> Self {
        let group_column = group_column.into();
        PivotDefinition {
            value_column: value_column.into(),
            row_label: group_column.clone(),
            group_column,
            period_mode: PeriodMode::default(),
            metric_mode: MetricMode::default(),
            reference: None,
        }
    }

    pub fn with_period_mode(mut self, period_mode: PeriodMode) -> Self {
        self.period_mode = period_mode;
        self
    }

    pub fn with_metric_mode(mut self, metric_mode: MetricMode) -> Self {
        self.metric_mode = metric_mode;
        self
    }

    pub fn with_row_label(mut self, row_label: impl Into<String>) -> Self {
        self.row_label = row_label.into();
        self
    }

    pub fn with_reference(mut self, reference: YearMonth) -> Self {
        self.reference = Some(reference);
        self
    }
}
