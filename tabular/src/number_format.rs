//! FILENAME: tabular/src/number_format.rs
//! PURPOSE: Number formatting for displaying indicator values.
//! CONTEXT: All tables and KPI cards render under Brazilian locale
//! conventions: `.` as thousands separator, `,` as decimal separator.
//! Undefined values (missing comparator, division by zero) render as a
//! placeholder dash and are classified as Neutral for styling.

use serde::{Deserialize, Serialize};

/// Placeholder rendered for undefined or non-finite values.
pub const PLACEHOLDER: &str = "-";

/// Sign classification used for conditional styling of deltas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sign {
    Positive,
    Negative,
    /// Exactly zero, undefined, or non-finite.
    Neutral,
}

/// Classifies a value for sign-based presentation. Never affects the
/// underlying number.
pub fn classify_sign(value: Option<f64>) -> Sign {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => Sign::Positive,
        Some(v) if v.is_finite() && v < 0.0 => Sign::Negative,
        _ => Sign::Neutral,
    }
}

/// Format a number with Brazilian separators, e.g. `1234567.8` with one
/// decimal place becomes `"1.234.567,8"`. Undefined values become `"-"`.
pub fn format_decimal(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) if v.is_finite() => localize(&format!("{:.prec$}", v, prec = decimals)),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Format a percentage with Brazilian separators, e.g. `"+1.234,5%"` when
/// `show_sign` is set. Undefined values become `"-"`, never `"NaN%"`.
pub fn format_percent(value: Option<f64>, decimals: usize, show_sign: bool) -> String {
    match value {
        Some(v) if v.is_finite() => {
            let raw = if show_sign {
                format!("{:+.prec$}", v, prec = decimals)
            } else {
                format!("{:.prec$}", v, prec = decimals)
            };
            format!("{}%", localize(&raw))
        }
        _ => PLACEHOLDER.to_string(),
    }
}

/// Inserts `.` thousands separators and swaps the decimal point for `,`.
/// Expects the plain `{:.N}` rendering of a finite number.
fn localize(s: &str) -> String {
    let (sign, rest) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => match s.strip_prefix('+') {
            Some(rest) => ("+", rest),
            None => ("", s),
        },
    };

    let mut parts = rest.splitn(2, '.');
    let integer_part = parts.next().unwrap_or("");
    let decimal_part = parts.next();

    let mut result = String::with_capacity(s.len() + integer_part.len() / 3);
    result.push_str(sign);

    let len = integer_part.len();
    for (i, c) in integer_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push('.');
        }
        result.push(c);
    }

    if let Some(decimal) = decimal_part {
        result.push(',');
        result.push_str(decimal);
    }

    result
}
