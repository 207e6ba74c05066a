//! Chart container lookup.
//!
//! The chart port only needs two things from the DOM: the container's
//! rendered width and a way to clear the previous drawing.

pub trait ChartContainer {
    /// Current rendered width in CSS pixels.
    fn client_width(&self) -> f64;

    /// Remove a previously drawn chart element. Returns whether one existed.
    fn clear_rendered_chart(&self) -> bool;
}

pub trait ChartDom {
    /// Find the container for `selector`, `None` when it is not mounted.
    fn find_container(&self, selector: &str) -> Option<Box<dyn ChartContainer>>;
}

#[cfg(feature = "browser")]
pub use browser::BrowserDom;

#[cfg(feature = "browser")]
mod browser {
    use super::{ChartContainer, ChartDom};
    use crate::consts::RENDERED_CHART_SELECTOR;
    use crate::error::js_message;

    /// The live `document`.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct BrowserDom;

    impl ChartDom for BrowserDom {
        fn find_container(&self, selector: &str) -> Option<Box<dyn ChartContainer>> {
            let document = web_sys::window().and_then(|w| w.document())?;
            match document.query_selector(selector) {
                Ok(found) => found.map(|element| Box::new(ElementContainer { element }) as Box<dyn ChartContainer>),
                Err(err) => {
                    log::warn!("dom: invalid selector {selector}: {}", js_message(&err));
                    None
                }
            }
        }
    }

    struct ElementContainer {
        element: web_sys::Element,
    }

    impl ChartContainer for ElementContainer {
        fn client_width(&self) -> f64 {
            f64::from(self.element.client_width())
        }

        fn clear_rendered_chart(&self) -> bool {
            match self.element.query_selector(RENDERED_CHART_SELECTOR) {
                Ok(Some(chart)) => {
                    chart.remove();
                    true
                }
                Ok(None) => false,
                Err(err) => {
                    log::warn!("dom: chart lookup failed: {}", js_message(&err));
                    false
                }
            }
        }
    }
}
