//! FILENAME: series-engine/src/variation.rs
//! Variation metrics - year-over-year and accumulated comparisons.
//!
//! All derived metrics follow the same contract: `(curr / prior - 1) * 100`,
//! defined only when the prior period exists and its value is positive.
//! Undefined results are `None`, never zero.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tabular::YearMonth;

use crate::aggregate::{MonthlySeries, SeriesPoint};

/// Observations discarded by `rolling_year_over_year` before the first
/// comparable point exists.
const WARMUP_OBSERVATIONS: usize = 12;

/// Which window a year-over-year comparison covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VariationMode {
    /// Compare the value at the reference month across consecutive years.
    Monthly,
    /// Compare the January-through-reference-month sum across consecutive years.
    Cumulative,
}

/// One row of an accumulated year comparison, e.g. the "Jan-Mai/25" bars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccumulatedPoint {
    pub year: i32,
    /// Year-to-date label, e.g. "Jan-Mai/25".
    pub label: String,
    pub value: f64,
    /// Variation against the previous listed year; `None` when the prior
    /// value is not a valid comparator.
    pub yoy: Option<f64>,
}

impl MonthlySeries {
    /// Year-over-year variation at a reference cut-off.
    ///
    /// `None` when either year is absent from the series or the prior value
    /// is <= 0 (divide-by-zero and sign-flip guard: the comparison is
    /// meaningless when values represent rates crossing zero).
    pub fn year_over_year(
        &self,
        reference_month: u32,
        reference_year: i32,
        mode: VariationMode,
    ) -> Option<f64> {
        let current = self.window_total(reference_year, reference_month, mode)?;
        let prior = self.window_total(reference_year - 1, reference_month, mode)?;

        if prior <= 0.0 {
            return None;
        }
        Some((current / prior - 1.0) * 100.0)
    }

    /// Sum of a year's observations inside the comparison window, or `None`
    /// when the year has no observation there.
    fn window_total(&self, year: i32, reference_month: u32, mode: VariationMode) -> Option<f64> {
        let mut total = 0.0;
        let mut seen = false;
        for point in self.points() {
            if point.period.year != year {
                continue;
            }
            let included = match mode {
                VariationMode::Monthly => point.period.month == reference_month,
                VariationMode::Cumulative => point.period.month <= reference_month,
            };
            if included {
                total += point.value;
                seen = true;
            }
        }
        seen.then_some(total)
    }

    /// Per-year sum of values with `month <= reference_month`. Years without
    /// any observation in the window are absent from the result.
    pub fn accumulate_to_date(&self, reference_month: u32) -> BTreeMap<i32, f64> {
        let mut totals = BTreeMap::new();
        for point in self.points() {
            if point.period.month <= reference_month {
                *totals.entry(point.period.year).or_insert(0.0) += point.value;
            }
        }
        totals
    }

    /// Year-over-year variation per observation, each compared against the
    /// observation twelve positions earlier. The earliest twelve
    /// observations are the warm-up window and are discarded outright
    /// rather than producing partial deltas; observations whose comparator
    /// is not a valid base (<= 0) are skipped as well.
    pub fn rolling_year_over_year(&self) -> MonthlySeries {
        let points = self.points();
        if points.len() <= WARMUP_OBSERVATIONS {
            return MonthlySeries::default();
        }

        MonthlySeries::from_pairs(points.iter().enumerate().skip(WARMUP_OBSERVATIONS).filter_map(
            |(i, point)| {
                let prior = points[i - WARMUP_OBSERVATIONS].value;
                (prior > 0.0).then(|| (point.period, (point.value / prior - 1.0) * 100.0))
            },
        ))
    }

    /// Accumulated January-through-`reference_month` totals per year, with
    /// the variation against the previous listed year. The first year has
    /// no comparator and is dropped.
    pub fn accumulated_comparison(&self, reference_month: u32) -> Vec<AccumulatedPoint> {
        let totals = self.accumulate_to_date(reference_month);

        let mut rows = Vec::new();
        let mut prior: Option<f64> = None;
        for (year, value) in totals {
            let yoy = prior
                .filter(|&p| p > 0.0)
                .map(|p| (value / p - 1.0) * 100.0);
            rows.push(AccumulatedPoint {
                year,
                label: YearMonth::new(year, reference_month).ytd_label(),
                value,
                yoy,
            });
            prior = Some(value);
        }

        // First listed year has nothing to compare against.
        if !rows.is_empty() {
            rows.remove(0);
        }
        rows
    }

    /// Restricts the series to an inclusive year range, preserving order.
    /// Backs the period slider of the chart collaborators.
    pub fn slice_years(&self, start_year: i32, end_year: i32) -> MonthlySeries {
        let points: Vec<SeriesPoint> = self
            .points()
            .iter()
            .copied()
            .filter(|p| p.period.year >= start_year && p.period.year <= end_year)
            .collect();
        MonthlySeries::from_pairs(points.into_iter().map(|p| (p.period, p.value)))
    }
}
