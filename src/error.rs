//! Error type shared by the port adapters.
//!
//! Storage failures propagate to the runtime boundary; presentation gaps
//! (a missing chart container) are not errors and never reach this type.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("chart error: {0}")]
    Chart(String),
    #[error("browser capability unavailable: {0}")]
    Unavailable(&'static str),
    #[error("port binding error: {0}")]
    Binding(String),
}

impl PortError {
    /// Stable code surfaced alongside the message at the JS boundary.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Json(_) => "E_JSON",
            Self::Storage(_) => "E_STORAGE",
            Self::Chart(_) => "E_CHART",
            Self::Unavailable(_) => "E_UNAVAILABLE",
            Self::Binding(_) => "E_BINDING",
        }
    }
}

/// Best-effort text for a thrown JS value.
#[cfg(feature = "browser")]
pub(crate) fn js_message(value: &wasm_bindgen::JsValue) -> String {
    use wasm_bindgen::JsCast;

    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

#[cfg(feature = "browser")]
impl From<PortError> for wasm_bindgen::JsValue {
    fn from(err: PortError) -> Self {
        let js_err = js_sys::Error::new(&err.to_string());
        js_err.set_name(err.error_code());
        js_err.into()
    }
}
