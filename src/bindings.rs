//! `wasm-bindgen` exports that attach the ports to the application runtime.
//!
//! The host page calls these once after starting the app:
//!
//! ```js
//! const app = Elm.Main.init({ node });
//! setupLocalStoragePort(app);
//! setupWaterfallPort(app, { currencySuffix: " €" });
//! ```
//!
//! Each setup call subscribes one closure to `app.ports.<name>`. The closures
//! live as long as the page, so they are leaked with `forget`.

use js_sys::{Function, JSON, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

use crate::chart::{ChartDataset, ChartPort, WaterfallChart};
use crate::config::ChartConfig;
use crate::consts::{RENDER_WATERFALL_PORT, WRITE_TO_LOCAL_STORAGE_PORT};
use crate::dom::BrowserDom;
use crate::error::{PortError, js_message};
use crate::resize::WindowResize;
use crate::schedule::AnimationFrameScheduler;
use crate::storage::{LocalStorage, StoragePort, StorageWriteRequest};

/// Module start hook: console logging and readable panics.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Debug) {
        log::debug!("ports: logger already installed ({err})");
    }
}

/// Subscribe the storage adapter to `app.ports.writeToLocalStorage`.
///
/// # Errors
///
/// Throws when `localStorage` is unavailable or the app has no such port.
#[wasm_bindgen(js_name = setupLocalStoragePort)]
pub fn setup_local_storage_port(app: &JsValue) -> Result<(), JsValue> {
    let port = StoragePort::new(LocalStorage::from_window()?);
    let handler = Closure::<dyn Fn(JsValue) -> Result<(), JsValue>>::new(move |payload: JsValue| {
        let request: StorageWriteRequest = serde_json::from_value(to_json(&payload)?).map_err(PortError::from)?;
        port.on_persist_request(request)?;
        Ok(())
    });
    subscribe(app, WRITE_TO_LOCAL_STORAGE_PORT, handler.as_ref())?;
    handler.forget();
    log::info!("ports: {WRITE_TO_LOCAL_STORAGE_PORT} attached");
    Ok(())
}

/// Subscribe the chart adapter to `app.ports.renderWaterfall`.
///
/// `config` is optional; see [`ChartConfig`] for the accepted fields.
///
/// # Errors
///
/// Throws when `config` is malformed or the app has no such port.
#[wasm_bindgen(js_name = setupWaterfallPort)]
pub fn setup_waterfall_port(app: &JsValue, config: JsValue) -> Result<(), JsValue> {
    let config = ChartConfig::from_json(to_json(&config)?).map_err(PortError::from)?;
    let port = ChartPort::new(
        config,
        BrowserDom,
        WaterfallChart::new(),
        AnimationFrameScheduler,
        WindowResize,
    );
    let handler = Closure::<dyn Fn(JsValue) -> Result<(), JsValue>>::new(move |payload: JsValue| {
        let dataset: ChartDataset = to_json(&payload)?;
        port.on_render_request(dataset);
        Ok(())
    });
    subscribe(app, RENDER_WATERFALL_PORT, handler.as_ref())?;
    handler.forget();
    log::info!("ports: {RENDER_WATERFALL_PORT} attached");
    Ok(())
}

/// Convert a JS payload to JSON; `undefined` becomes `null`.
fn to_json(value: &JsValue) -> Result<serde_json::Value, PortError> {
    if value.is_undefined() || value.is_null() {
        return Ok(serde_json::Value::Null);
    }
    let text = JSON::stringify(value).map_err(|err| PortError::Binding(js_message(&err)))?;
    Ok(serde_json::from_str(&String::from(text))?)
}

/// Call `app.ports[name].subscribe(handler)`.
fn subscribe(app: &JsValue, name: &str, handler: &JsValue) -> Result<(), PortError> {
    let ports = get(app, "ports")?;
    let port = get(&ports, name)?;
    if port.is_undefined() {
        return Err(PortError::Binding(format!("app.ports.{name} is not defined")));
    }
    let subscribe = get(&port, "subscribe")?
        .dyn_into::<Function>()
        .map_err(|_| PortError::Binding(format!("app.ports.{name}.subscribe is not a function")))?;
    subscribe
        .call1(&port, handler)
        .map_err(|err| PortError::Binding(js_message(&err)))?;
    Ok(())
}

fn get(target: &JsValue, key: &str) -> Result<JsValue, PortError> {
    if target.is_undefined() || target.is_null() {
        return Err(PortError::Binding(format!("cannot read {key} of {target:?}")));
    }
    Reflect::get(target, &JsValue::from_str(key)).map_err(|err| PortError::Binding(js_message(&err)))
}
