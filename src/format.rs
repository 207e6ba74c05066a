//! Value-axis label formatting for the waterfall chart.
//!
//! Amounts are rounded to whole units; anything past the thousands threshold
//! is abbreviated to whole thousands with a `K` marker. Rounding is half away
//! from zero, so `-2500` becomes `-3K`.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

use crate::consts::{CURRENCY_SUFFIX, THOUSAND, THOUSANDS_THRESHOLD};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YFormatter {
    suffix: String,
}

impl Default for YFormatter {
    fn default() -> Self {
        Self::new(CURRENCY_SUFFIX)
    }
}

impl YFormatter {
    #[must_use]
    pub fn new(suffix: impl Into<String>) -> Self {
        Self { suffix: suffix.into() }
    }

    #[must_use]
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Format one axis value, e.g. `1500.0` as `"2K €"`.
    #[must_use]
    pub fn format(&self, value: f64) -> String {
        format_amount(value, &self.suffix)
    }
}

/// Format `value` as a rounded amount followed by `suffix`.
#[must_use]
pub fn format_amount(value: f64, suffix: &str) -> String {
    let rounded = normalize_zero(value.round());
    if rounded.abs() > THOUSANDS_THRESHOLD {
        let thousands = normalize_zero((rounded / THOUSAND).round());
        format!("{thousands}K{suffix}")
    } else {
        format!("{rounded}{suffix}")
    }
}

// -0.4 rounds to -0.0, which would otherwise print as "-0".
fn normalize_zero(value: f64) -> f64 {
    value + 0.0
}
