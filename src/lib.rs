//! Browser ports for the budget front-end.
//!
//! This crate is compiled to WebAssembly and bridges the declarative
//! application runtime to imperative browser APIs. The runtime emits outbound
//! port messages; each adapter here consumes one channel and performs the
//! matching browser call. Every browser capability sits behind a trait so the
//! adapters run unchanged against in-memory doubles in host tests.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`storage`] | `writeToLocalStorage` port: persist or remove JSON values |
//! | [`chart`] | `renderWaterfall` port: deferred, resize-aware chart rendering |
//! | [`format`] | Value-axis label formatting |
//! | [`schedule`] | Deferred execution before the next repaint |
//! | [`resize`] | Owned resize subscriptions |
//! | [`dom`] | Chart container lookup |
//! | [`config`] | Chart surface configuration |
//! | [`error`] | Port error type |
//! | [`consts`] | Port names, selectors, and formatting constants |
//! | `bindings` | `wasm-bindgen` exports wiring the ports to the runtime (`browser` feature) |

#[cfg(feature = "browser")]
pub mod bindings;
pub mod chart;
pub mod config;
pub mod consts;
pub mod dom;
pub mod error;
pub mod format;
pub mod resize;
pub mod schedule;
pub mod storage;
