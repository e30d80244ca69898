//! FILENAME: pivot-engine/src/view.rs
//! Pivot View - Renderable output for the tabular-display collaborators.
//!
//! Plain label + cell structures; the renderer applies locale formatting
//! and sign styling (`tabular::number_format`) on top.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A single pivot row: category label plus one cell per period column.
/// `None` cells are undefined metrics (missing comparator, zero divisor)
/// and render as a placeholder, never as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PivotRow {
    pub label: String,
    pub cells: SmallVec<[Option<f64>; 8]>,
}

/// The rendered pivot: ordered period columns x ranked category rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PivotView {
    /// Display label of the row dimension (e.g. "País").
    pub row_label: String,

    /// Period column labels in chronological year order.
    pub columns: Vec<String>,

    /// Rows ranked by the absolute value of the most recent period.
    pub rows: Vec<PivotRow>,
}

impl PivotView {
    /// An empty view carrying only the row dimension label.
    pub fn empty(row_label: impl Into<String>) -> Self {
        PivotView {
            row_label: row_label.into(),
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Cell lookup by row label and column label.
    pub fn cell(&self, row_label: &str, column_label: &str) -> Option<f64> {
        let col = self.columns.iter().position(|c| c == column_label)?;
        let row = self.rows.iter().find(|r| r.label == row_label)?;
        row.cells.get(col).copied().flatten()
    }
}
