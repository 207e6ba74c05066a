//! Chart surface configuration.
//!
//! The host may pass a partial JS object to `setupWaterfallPort`; missing
//! fields fall back to the defaults in [`crate::consts`].

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{CURRENCY_SUFFIX, HEIGHT_RATIO, WATERFALL_SELECTOR};
use crate::format::YFormatter;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartConfig {
    /// Selector of the container element.
    pub selector: String,
    /// Suffix appended to value-axis labels.
    pub currency_suffix: String,
    /// Height as a fraction of the container width.
    pub height_ratio: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            selector: WATERFALL_SELECTOR.to_owned(),
            currency_suffix: CURRENCY_SUFFIX.to_owned(),
            height_ratio: HEIGHT_RATIO,
        }
    }
}

impl ChartConfig {
    /// Parse a config from JSON, treating `null` as "all defaults".
    ///
    /// # Errors
    ///
    /// Returns an error when a present field has the wrong type.
    pub fn from_json(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        if value.is_null() {
            return Ok(Self::default());
        }
        serde_json::from_value(value)
    }

    #[must_use]
    pub fn y_formatter(&self) -> YFormatter {
        YFormatter::new(self.currency_suffix.clone())
    }
}
