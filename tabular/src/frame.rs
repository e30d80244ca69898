//! FILENAME: tabular/src/frame.rs
//! PURPOSE: Typed, immutable tabular records (struct-of-arrays).
//! CONTEXT: The data-access layer hands the core already-materialized
//! monthly records. `Frame` gives them an explicit column schema so that
//! column presence and types are checked once at the boundary; past that
//! point the engines may assume well-typed input.

use serde::{Deserialize, Serialize};

use crate::calendar::YearMonth;
use crate::error::FrameError;

/// Column holding the calendar year of each record.
pub const YEAR_COLUMN: &str = "ano";

/// Column holding the calendar month (1..=12) of each record.
pub const MONTH_COLUMN: &str = "mes";

// ============================================================================
// COLUMNS
// ============================================================================

/// Typed storage for one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ColumnData {
    Int(Vec<i64>),
    Number(Vec<f64>),
    /// Categorical values; `None` marks a missing grouping value.
    Text(Vec<Option<String>>),
}

impl ColumnData {
    fn len(&self) -> usize {
        match self {
            ColumnData::Int(v) => v.len(),
            ColumnData::Number(v) => v.len(),
            ColumnData::Text(v) => v.len(),
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            ColumnData::Int(_) => "integer",
            ColumnData::Number(_) => "number",
            ColumnData::Text(_) => "text",
        }
    }
}

/// A named column of the frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

// ============================================================================
// FRAME
// ============================================================================

/// An immutable set of equally long named columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    columns: Vec<Column>,
    rows: usize,
}

impl Frame {
    /// Starts building a frame column by column.
    pub fn builder() -> FrameBuilder {
        FrameBuilder {
            columns: Vec::new(),
        }
    }

    /// An empty frame with no columns.
    pub fn empty() -> Self {
        Frame {
            columns: Vec::new(),
            rows: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Checks that all named columns are present.
    pub fn require_columns(&self, names: &[&str]) -> Result<(), FrameError> {
        for name in names {
            if self.column(name).is_none() {
                return Err(FrameError::MissingColumn((*name).to_string()));
            }
        }
        Ok(())
    }

    pub fn int_values(&self, name: &str) -> Result<&[i64], FrameError> {
        let column = self
            .column(name)
            .ok_or_else(|| FrameError::MissingColumn(name.to_string()))?;
        match &column.data {
            ColumnData::Int(values) => Ok(values),
            other => Err(FrameError::TypeMismatch {
                name: name.to_string(),
                expected: "integer",
                actual: other.type_name(),
            }),
        }
    }

    pub fn number_values(&self, name: &str) -> Result<&[f64], FrameError> {
        let column = self
            .column(name)
            .ok_or_else(|| FrameError::MissingColumn(name.to_string()))?;
        match &column.data {
            ColumnData::Number(values) => Ok(values),
            other => Err(FrameError::TypeMismatch {
                name: name.to_string(),
                expected: "number",
                actual: other.type_name(),
            }),
        }
    }

    pub fn text_values(&self, name: &str) -> Result<&[Option<String>], FrameError> {
        let column = self
            .column(name)
            .ok_or_else(|| FrameError::MissingColumn(name.to_string()))?;
        match &column.data {
            ColumnData::Text(values) => Ok(values),
            other => Err(FrameError::TypeMismatch {
                name: name.to_string(),
                expected: "text",
                actual: other.type_name(),
            }),
        }
    }

    /// The `(year, month)` period of every record, in record order.
    pub fn periods(&self) -> Result<Vec<YearMonth>, FrameError> {
        let years = self.int_values(YEAR_COLUMN)?;
        let months = self.int_values(MONTH_COLUMN)?;
        Ok(years
            .iter()
            .zip(months.iter())
            .map(|(&y, &m)| YearMonth::new(y as i32, m as u32))
            .collect())
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Builds a `Frame`, validating column lengths and the month range.
pub struct FrameBuilder {
    columns: Vec<Column>,
}

impl FrameBuilder {
    pub fn int(mut self, name: impl Into<String>, values: Vec<i64>) -> Self {
        self.columns.push(Column {
            name: name.into(),
            data: ColumnData::Int(values),
        });
        self
    }

    pub fn number(mut self, name: impl Into<String>, values: Vec<f64>) -> Self {
        self.columns.push(Column {
            name: name.into(),
            data: ColumnData::Number(values),
        });
        self
    }

    pub fn text(mut self, name: impl Into<String>, values: Vec<Option<String>>) -> Self {
        self.columns.push(Column {
            name: name.into(),
            data: ColumnData::Text(values),
        });
        self
    }

    pub fn build(self) -> Result<Frame, FrameError> {
        let rows = self.columns.first().map_or(0, |c| c.data.len());

        for column in &self.columns {
            if column.data.len() != rows {
                return Err(FrameError::LengthMismatch {
                    name: column.name.clone(),
                    expected: rows,
                    actual: column.data.len(),
                });
            }
        }

        // Months are validated once here so every consumer can index
        // month tables without re-checking.
        if let Some(column) = self.columns.iter().find(|c| c.name == MONTH_COLUMN) {
            if let ColumnData::Int(months) = &column.data {
                for &month in months {
                    if !(1..=12).contains(&month) {
                        return Err(FrameError::MonthOutOfRange(month));
                    }
                }
            }
        }

        Ok(Frame {
            columns: self.columns,
            rows,
        })
    }
}
