//! Shared constants for the port adapters.

// ── Port names ──────────────────────────────────────────────────

/// Outbound runtime port carrying storage write/remove requests.
pub const WRITE_TO_LOCAL_STORAGE_PORT: &str = "writeToLocalStorage";

/// Outbound runtime port carrying waterfall datasets.
pub const RENDER_WATERFALL_PORT: &str = "renderWaterfall";

// ── Chart surface ───────────────────────────────────────────────

/// Selector of the element hosting the waterfall chart.
pub const WATERFALL_SELECTOR: &str = "#waterfall";

/// Selector of the chart element drawn inside the container.
pub const RENDERED_CHART_SELECTOR: &str = "svg";

/// Chart height as a fraction of the container width (2:1).
pub const HEIGHT_RATIO: f64 = 0.5;

// ── Value axis ──────────────────────────────────────────────────

/// Currency suffix appended to every value-axis label.
///
/// Hardcoded to euros; override through [`crate::config::ChartConfig`].
pub const CURRENCY_SUFFIX: &str = " €";

/// Largest absolute rounded value printed without the `K` abbreviation.
pub const THOUSANDS_THRESHOLD: f64 = 999.0;

/// Divisor applied to values above [`THOUSANDS_THRESHOLD`].
pub const THOUSAND: f64 = 1000.0;
