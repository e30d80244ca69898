//! FILENAME: series-engine/src/aggregate.rs
//! Monthly aggregation - Frame to chronologically indexed series.
//!
//! Groups raw records by (year, month), sums the requested metric within
//! each group, and yields an ascending series. Gaps (missing months) are
//! preserved, never interpolated.

use std::collections::BTreeMap;

use log::debug;
use serde::{Deserialize, Serialize};
use tabular::{Frame, FrameError, YearMonth};

/// One observation of a monthly series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub period: YearMonth,
    pub value: f64,
}

/// A chronologically ascending series with at most one value per period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlySeries {
    points: Vec<SeriesPoint>,
}

impl MonthlySeries {
    /// Builds a series from period/value pairs, summing duplicates and
    /// sorting ascending.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (YearMonth, f64)>) -> Self {
        let mut grouped: BTreeMap<YearMonth, f64> = BTreeMap::new();
        for (period, value) in pairs {
            *grouped.entry(period).or_insert(0.0) += value;
        }
        MonthlySeries {
            points: grouped
                .into_iter()
                .map(|(period, value)| SeriesPoint { period, value })
                .collect(),
        }
    }

    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The value at a specific period, if present.
    pub fn value_at(&self, period: YearMonth) -> Option<f64> {
        self.points
            .binary_search_by(|p| p.period.cmp(&period))
            .ok()
            .map(|i| self.points[i].value)
    }

    /// The latest period present, if any.
    pub fn last_period(&self) -> Option<YearMonth> {
        self.points.last().map(|p| p.period)
    }

    /// Distinct years present, ascending.
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.points.iter().map(|p| p.period.year).collect();
        years.dedup();
        years
    }
}

/// Groups `frame` by (year, month) and sums `metric` within each group.
/// An empty frame yields an empty series.
pub fn aggregate_monthly(frame: &Frame, metric: &str) -> Result<MonthlySeries, FrameError> {
    if frame.is_empty() {
        return Ok(MonthlySeries::default());
    }

    let periods = frame.periods()?;
    let values = frame.number_values(metric)?;

    let series = MonthlySeries::from_pairs(periods.into_iter().zip(values.iter().copied()));
    debug!(
        "aggregated {} records into {} monthly points for `{}`",
        frame.len(),
        series.len(),
        metric
    );
    Ok(series)
}

/// The reference period of a frame: the maximum (year, month) pair present
/// in the records at hand. Different category filters may yield different
/// reference months when data arrives incomplete per category.
pub fn latest_period(frame: &Frame) -> Result<Option<YearMonth>, FrameError> {
    if frame.is_empty() {
        return Ok(None);
    }
    Ok(frame.periods()?.into_iter().max())
}
