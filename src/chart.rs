//! Chart port: renders the waterfall chart and keeps it sized to the window.
//!
//! DESIGN
//! ======
//! Each `renderWaterfall` message does two things:
//!
//! 1. Drops the current resize subscription and installs a new one closing
//!    over the new dataset, so only the latest dataset reacts to resizes.
//! 2. Schedules a draw through the [`FrameScheduler`] instead of drawing
//!    inline, so the draw sees the DOM the runtime committed for this frame.
//!
//! A draw clears any previous chart element and redraws from scratch at the
//! container's current width. A missing container is a normal state (the
//! panel may be hidden) and skips the draw.
//!
//! TRADE-OFFS
//! ==========
//! Already-scheduled draws are not cancelled. Two requests inside one frame
//! draw twice; the second draw wins.

#[cfg(test)]
#[path = "chart_test.rs"]
mod chart_test;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::config::ChartConfig;
use crate::dom::ChartDom;
use crate::error::PortError;
use crate::format::YFormatter;
use crate::resize::{ResizeSource, Subscription};
use crate::schedule::FrameScheduler;

/// Data points for one chart. Opaque here: the renderer owns its shape.
pub type ChartDataset = serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewPort {
    pub width: f64,
    pub height: f64,
}

impl ViewPort {
    #[must_use]
    pub fn from_width(width: f64, height_ratio: f64) -> Self {
        Self { width, height: width * height_ratio }
    }
}

/// Everything the charting collaborator needs for one draw.
#[derive(Debug)]
pub struct RenderRequest<'a> {
    pub data: &'a ChartDataset,
    pub element_selector: &'a str,
    pub view_port: ViewPort,
    pub y_formatter: &'a YFormatter,
}

/// The external charting library.
pub trait ChartRenderer {
    /// Draw into the element matching `request.element_selector`.
    ///
    /// # Errors
    ///
    /// Returns an error when the library rejects the draw.
    fn render(&self, request: &RenderRequest<'_>) -> Result<(), PortError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartState {
    /// No render request seen yet.
    Idle,
    /// Resize handler installed; a draw is pending or was skipped.
    ResizeArmed,
    Rendering,
    Rendered,
}

/// Adapter for the `renderWaterfall` port.
pub struct ChartPort {
    inner: Rc<ChartInner>,
}

struct ChartInner {
    config: ChartConfig,
    formatter: YFormatter,
    dom: Box<dyn ChartDom>,
    renderer: Box<dyn ChartRenderer>,
    scheduler: Box<dyn FrameScheduler>,
    resize: Box<dyn ResizeSource>,
    subscription: RefCell<Option<Subscription>>,
    state: Cell<ChartState>,
    draws: Cell<u64>,
}

impl ChartPort {
    pub fn new(
        config: ChartConfig,
        dom: impl ChartDom + 'static,
        renderer: impl ChartRenderer + 'static,
        scheduler: impl FrameScheduler + 'static,
        resize: impl ResizeSource + 'static,
    ) -> Self {
        let formatter = config.y_formatter();
        Self {
            inner: Rc::new(ChartInner {
                config,
                formatter,
                dom: Box::new(dom),
                renderer: Box::new(renderer),
                scheduler: Box::new(scheduler),
                resize: Box::new(resize),
                subscription: RefCell::new(None),
                state: Cell::new(ChartState::Idle),
                draws: Cell::new(0),
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn state(&self) -> ChartState {
        self.inner.state.get()
    }

    /// Number of completed draw calls.
    #[must_use]
    pub fn draw_count(&self) -> u64 {
        self.inner.draws.get()
    }

    /// Handle one render message: re-arm resize, then schedule a draw.
    pub fn on_render_request(&self, dataset: ChartDataset) {
        let dataset = Rc::new(dataset);

        // Unsubscribe the previous handler before installing the new one.
        let previous = self.inner.subscription.borrow_mut().take();
        drop(previous);

        let weak = Rc::downgrade(&self.inner);
        let resize_dataset = Rc::clone(&dataset);
        let subscription = self.inner.resize.subscribe(Box::new(move || {
            if let Some(inner) = weak.upgrade() {
                log::debug!("chart: resize, redrawing");
                inner.render(&resize_dataset);
            }
        }));
        *self.inner.subscription.borrow_mut() = Some(subscription);
        self.inner.state.set(ChartState::ResizeArmed);

        let weak = Rc::downgrade(&self.inner);
        self.inner.scheduler.schedule(Box::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.render(&dataset);
            }
        }));
    }

    /// Draw `dataset` immediately. Safe to call repeatedly.
    pub fn render(&self, dataset: &ChartDataset) {
        self.inner.render(dataset);
    }
}

impl ChartInner {
    fn render(&self, dataset: &ChartDataset) {
        self.state.set(ChartState::Rendering);
        let selector = self.config.selector.as_str();

        let Some(container) = self.dom.find_container(selector) else {
            log::debug!("chart: container {selector} not mounted, skipping draw");
            self.state.set(self.resting_state());
            return;
        };

        if container.clear_rendered_chart() {
            log::debug!("chart: cleared previous chart in {selector}");
        }

        let request = RenderRequest {
            data: dataset,
            element_selector: selector,
            view_port: ViewPort::from_width(container.client_width(), self.config.height_ratio),
            y_formatter: &self.formatter,
        };
        match self.renderer.render(&request) {
            Ok(()) => {
                self.draws.set(self.draws.get() + 1);
                self.state.set(ChartState::Rendered);
            }
            Err(err) => {
                log::error!("chart: draw into {selector} failed: {err}");
                self.state.set(self.resting_state());
            }
        }
    }

    fn resting_state(&self) -> ChartState {
        if self.subscription.borrow().is_some() {
            ChartState::ResizeArmed
        } else {
            ChartState::Idle
        }
    }
}

#[cfg(feature = "browser")]
pub use browser::WaterfallChart;

#[cfg(feature = "browser")]
mod browser {
    use std::cell::RefCell;

    use js_sys::{Object, Reflect};
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::prelude::*;

    use super::{ChartRenderer, RenderRequest};
    use crate::error::{PortError, js_message};

    #[wasm_bindgen]
    extern "C" {
        #[wasm_bindgen(js_name = waterfallChart, catch)]
        fn waterfall_chart(options: &JsValue) -> Result<(), JsValue>;
    }

    type FormatterClosure = Closure<dyn Fn(f64) -> String>;

    /// The global `waterfallChart` function loaded next to the app bundle.
    #[derive(Default)]
    pub struct WaterfallChart {
        // The chart keeps calling the formatter after render returns.
        formatter: RefCell<Option<FormatterClosure>>,
    }

    impl WaterfallChart {
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        fn options(&self, request: &RenderRequest<'_>) -> Result<JsValue, PortError> {
            let data = js_sys::JSON::parse(&serde_json::to_string(request.data)?)
                .map_err(|err| PortError::Chart(js_message(&err)))?;

            let view_port = Object::new();
            set(&view_port, "width", &request.view_port.width.into())?;
            set(&view_port, "height", &request.view_port.height.into())?;

            let formatter = request.y_formatter.clone();
            let closure: FormatterClosure = Closure::new(move |value: f64| formatter.format(value));

            let options = Object::new();
            set(&options, "data", &data)?;
            set(&options, "elementSelector", &request.element_selector.into())?;
            set(&options, "viewPort", &view_port)?;
            set(&options, "yFormatter", closure.as_ref())?;

            *self.formatter.borrow_mut() = Some(closure);
            Ok(options.into())
        }
    }

    impl ChartRenderer for WaterfallChart {
        fn render(&self, request: &RenderRequest<'_>) -> Result<(), PortError> {
            let options = self.options(request)?;
            waterfall_chart(&options).map_err(|err| PortError::Chart(js_message(&err)))
        }
    }

    fn set(target: &Object, key: &str, value: &JsValue) -> Result<(), PortError> {
        Reflect::set(target, &JsValue::from_str(key), value)
            .map_err(|err| PortError::Chart(js_message(&err)))?;
        Ok(())
    }
}
