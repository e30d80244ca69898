//! FILENAME: tabular/src/calendar.rs
//! PURPOSE: Calendar periods and Brazilian Portuguese month labels.
//! CONTEXT: Every series and pivot in the dashboard is keyed by a
//! (year, month) pair and labelled in pt-BR ("Jan/25", "Jan-Mai/25").

use serde::{Deserialize, Serialize};

/// Full pt-BR month names, indexed by month number - 1.
pub const MONTH_NAMES: [&str; 12] = [
    "Janeiro",
    "Fevereiro",
    "Março",
    "Abril",
    "Maio",
    "Junho",
    "Julho",
    "Agosto",
    "Setembro",
    "Outubro",
    "Novembro",
    "Dezembro",
];

/// Returns the full pt-BR month name, or an empty string for an
/// out-of-range month.
pub fn month_name(month: u32) -> &'static str {
    match month {
        1..=12 => MONTH_NAMES[(month - 1) as usize],
        _ => "",
    }
}

/// Returns the three-letter pt-BR abbreviation (Jan, Fev, Mar, Abr, Mai,
/// Jun, Jul, Ago, Set, Out, Nov, Dez).
pub fn month_abbrev(month: u32) -> &'static str {
    match month {
        1 => "Jan",
        2 => "Fev",
        3 => "Mar",
        4 => "Abr",
        5 => "Mai",
        6 => "Jun",
        7 => "Jul",
        8 => "Ago",
        9 => "Set",
        10 => "Out",
        11 => "Nov",
        12 => "Dez",
        _ => "",
    }
}

/// A calendar month within a year. Orders chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Self {
        YearMonth { year, month }
    }

    /// Two-digit year suffix ("2025" -> "25").
    fn year_suffix(&self) -> String {
        format!("{:02}", self.year.rem_euclid(100))
    }

    /// Single-period column label, e.g. "Mai/25".
    pub fn label(&self) -> String {
        format!("{}/{}", month_abbrev(self.month), self.year_suffix())
    }

    /// Year-to-date column label, e.g. "Jan-Mai/25".
    pub fn ytd_label(&self) -> String {
        format!("Jan-{}/{}", month_abbrev(self.month), self.year_suffix())
    }

    /// KPI caption form, e.g. "Maio de 2025".
    pub fn caption(&self) -> String {
        format!("{} de {}", month_name(self.month), self.year)
    }
}
