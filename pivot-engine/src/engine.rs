//! FILENAME: pivot-engine/src/engine.rs
//! Pivot Engine - The calculation core that reshapes records into a view.
//!
//! This module takes a PivotDefinition (configuration) and a Frame (data)
//! and produces a PivotView (category x period grid ready for rendering).
//!
//! Algorithm:
//! 1. Resolve the reference period (latest (year, month) unless overridden)
//! 2. Filter records to the period window and group by (category, year)
//! 3. Materialize the absolute matrix, missing cells filled with 0
//! 4. Rank rows by the most recent column, descending - the ranking is
//!    frozen BEFORE any metric transform so that percentage tables are not
//!    re-sorted by their own (possibly sign-flipped) values
//! 5. Apply the metric transform and label the columns

use std::collections::BTreeSet;

use log::debug;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tabular::{Frame, FrameError, YearMonth};

use crate::definition::{MetricMode, PeriodMode, PivotDefinition};
use crate::view::{PivotRow, PivotView};

/// The main calculation engine for category x period pivots.
pub struct PivotBuilder<'a> {
    definition: &'a PivotDefinition,
    frame: &'a Frame,
}

impl<'a> PivotBuilder<'a> {
    pub fn new(definition: &'a PivotDefinition, frame: &'a Frame) -> Self {
        PivotBuilder { definition, frame }
    }

    /// Executes the full calculation and returns the rendered view.
    /// Empty input yields an empty view, not an error.
    pub fn build(&self) -> Result<PivotView, FrameError> {
        if self.frame.is_empty() {
            return Ok(PivotView::empty(&self.definition.row_label));
        }

        // Step 1: reference period
        let reference = match self.definition.reference {
            Some(reference) => reference,
            None => match self.frame.periods()?.into_iter().max() {
                Some(latest) => latest,
                None => return Ok(PivotView::empty(&self.definition.row_label)),
            },
        };

        // Step 2: filter and group
        let (totals, years) = self.group_by_category_and_year(reference)?;
        if totals.is_empty() {
            return Ok(PivotView::empty(&self.definition.row_label));
        }
        let years: Vec<i32> = years.into_iter().collect();

        // Step 3: absolute matrix, 0-filled
        let mut categories: Vec<&String> = totals.keys().map(|(category, _)| category).collect();
        categories.sort();
        categories.dedup();

        let mut matrix: Vec<(String, Vec<f64>)> = categories
            .into_iter()
            .map(|category| {
                let cells: Vec<f64> = years
                    .iter()
                    .map(|&year| {
                        totals
                            .get(&(category.clone(), year))
                            .copied()
                            .unwrap_or(0.0)
                    })
                    .collect();
                (category.clone(), cells)
            })
            .collect();

        // Step 4: frozen ranking by the most recent column
        matrix.sort_by(|(label_a, cells_a), (label_b, cells_b)| {
            let a = cells_a.last().copied().unwrap_or(0.0);
            let b = cells_b.last().copied().unwrap_or(0.0);
            b.partial_cmp(&a)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| label_a.cmp(label_b))
        });

        // Step 5: metric transform and column labels
        let view = match self.definition.metric_mode {
            MetricMode::Absolute => self.absolute_view(&matrix, &years, reference),
            MetricMode::ShareOfTotal => self.share_of_total_view(&matrix, &years, reference),
            MetricMode::PeriodChange => self.period_change_view(&matrix, &years, reference),
        };

        debug!(
            "pivot on `{}` x `{}`: {} rows, {} columns (reference {:?})",
            self.definition.group_column,
            self.definition.value_column,
            view.rows.len(),
            view.columns.len(),
            reference
        );
        Ok(view)
    }

    /// Sums the value column per (category, year) inside the period window.
    /// Records whose grouping value is null are dropped.
    fn group_by_category_and_year(
        &self,
        reference: YearMonth,
    ) -> Result<(FxHashMap<(String, i32), f64>, BTreeSet<i32>), FrameError> {
        let periods = self.frame.periods()?;
        let values = self.frame.number_values(&self.definition.value_column)?;
        let groups = self.frame.text_values(&self.definition.group_column)?;

        let mut totals: FxHashMap<(String, i32), f64> = FxHashMap::default();
        let mut years = BTreeSet::new();

        for ((period, &value), group) in periods.iter().zip(values.iter()).zip(groups.iter()) {
            let included = match self.definition.period_mode {
                PeriodMode::SinglePeriod => period.month == reference.month,
                PeriodMode::YearToDate => period.month <= reference.month,
            };
            if !included {
                continue;
            }
            let Some(category) = group else {
                continue;
            };

            *totals
                .entry((category.clone(), period.year))
                .or_insert(0.0) += value;
            years.insert(period.year);
        }

        Ok((totals, years))
    }

    fn column_label(&self, year: i32, reference: YearMonth) -> String {
        let period = YearMonth::new(year, reference.month);
        match self.definition.period_mode {
            PeriodMode::SinglePeriod => period.label(),
            PeriodMode::YearToDate => period.ytd_label(),
        }
    }

    fn absolute_view(
        &self,
        matrix: &[(String, Vec<f64>)],
        years: &[i32],
        reference: YearMonth,
    ) -> PivotView {
        PivotView {
            row_label: self.definition.row_label.clone(),
            columns: years
                .iter()
                .map(|&year| self.column_label(year, reference))
                .collect(),
            rows: matrix
                .iter()
                .map(|(label, cells)| PivotRow {
                    label: label.clone(),
                    cells: cells.iter().map(|&v| Some(v)).collect(),
                })
                .collect(),
        }
    }

    /// Each cell divided by its column total; columns sum to 100 barring
    /// rounding. A zero column total leaves the column undefined.
    fn share_of_total_view(
        &self,
        matrix: &[(String, Vec<f64>)],
        years: &[i32],
        reference: YearMonth,
    ) -> PivotView {
        let column_totals: Vec<f64> = (0..years.len())
            .map(|col| matrix.iter().map(|(_, cells)| cells[col]).sum())
            .collect();

        PivotView {
            row_label: self.definition.row_label.clone(),
            columns: years
                .iter()
                .map(|&year| self.column_label(year, reference))
                .collect(),
            rows: matrix
                .iter()
                .map(|(label, cells)| PivotRow {
                    label: label.clone(),
                    cells: cells
                        .iter()
                        .zip(column_totals.iter())
                        .map(|(&v, &total)| (total != 0.0).then(|| v / total * 100.0))
                        .collect(),
                })
                .collect(),
        }
    }

    /// Variation against the previous column; the first column has no
    /// predecessor and is dropped. Fewer than two columns means there is
    /// nothing to compare, so the view is empty.
    fn period_change_view(
        &self,
        matrix: &[(String, Vec<f64>)],
        years: &[i32],
        reference: YearMonth,
    ) -> PivotView {
        if years.len() < 2 {
            return PivotView::empty(&self.definition.row_label);
        }

        PivotView {
            row_label: self.definition.row_label.clone(),
            columns: years[1..]
                .iter()
                .map(|&year| self.column_label(year, reference))
                .collect(),
            rows: matrix
                .iter()
                .map(|(label, cells)| {
                    let changes: SmallVec<[Option<f64>; 8]> = cells
                        .windows(2)
                        .map(|pair| {
                            let (prev, curr) = (pair[0], pair[1]);
                            (prev != 0.0).then(|| (curr / prev - 1.0) * 100.0)
                        })
                        .collect();
                    PivotRow {
                        label: label.clone(),
                        cells: changes,
                    }
                })
                .collect(),
        }
    }
}

/// Convenience wrapper over `PivotBuilder` for one-shot calls.
pub fn build_pivot(definition: &PivotDefinition, frame: &Frame) -> Result<PivotView, FrameError> {
    PivotBuilder::new(definition, frame).build()
}
