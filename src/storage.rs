//! Storage port: persists runtime values to durable key-value storage.
//!
//! DESIGN
//! ======
//! Each `writeToLocalStorage` message is applied synchronously: a non-null
//! value is written as pretty-printed JSON under its key, a null value
//! removes the key. Nothing is reported back to the runtime. Store failures
//! (quota exceeded, disabled storage) are returned to the caller unretried so
//! the bindings can rethrow them at the runtime boundary.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::cell::RefCell;
use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::PortError;

/// One outbound persist message. `value: None` (JSON `null` or absent) means remove.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageWriteRequest {
    pub key: String,
    #[serde(default)]
    pub value: Option<serde_json::Value>,
}

impl StorageWriteRequest {
    /// Build a write request from any serializable value.
    ///
    /// # Errors
    ///
    /// Returns an error when `value` cannot be represented as JSON.
    pub fn write<T: Serialize>(key: impl Into<String>, value: &T) -> Result<Self, PortError> {
        let value = serde_json::to_value(value)?;
        Ok(Self { key: key.into(), value: (!value.is_null()).then_some(value) })
    }

    #[must_use]
    pub fn remove(key: impl Into<String>) -> Self {
        Self { key: key.into(), value: None }
    }
}

/// Synchronous string key-value store (`localStorage` shape).
pub trait KeyValueStore {
    /// # Errors
    ///
    /// Returns an error when the store refuses the read.
    fn get_item(&self, key: &str) -> Result<Option<String>, PortError>;

    /// # Errors
    ///
    /// Returns an error when the store refuses the write (e.g. quota exceeded).
    fn set_item(&self, key: &str, value: &str) -> Result<(), PortError>;

    /// Removing a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error when the store refuses the removal.
    fn remove_item(&self, key: &str) -> Result<(), PortError>;
}

/// In-memory store for hosts without `localStorage` and for tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RefCell<BTreeMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.items.borrow().contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, PortError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), PortError> {
        self.items.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), PortError> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

/// `window.localStorage`, resolved once when the port is set up.
#[cfg(feature = "browser")]
pub struct LocalStorage {
    storage: web_sys::Storage,
}

#[cfg(feature = "browser")]
impl LocalStorage {
    /// # Errors
    ///
    /// Returns an error when there is no window or storage access is denied.
    pub fn from_window() -> Result<Self, PortError> {
        use crate::error::js_message;

        let window = web_sys::window().ok_or(PortError::Unavailable("window"))?;
        let storage = window
            .local_storage()
            .map_err(|err| PortError::Storage(js_message(&err)))?
            .ok_or(PortError::Unavailable("localStorage"))?;
        Ok(Self { storage })
    }
}

#[cfg(feature = "browser")]
impl KeyValueStore for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, PortError> {
        self.storage
            .get_item(key)
            .map_err(|err| PortError::Storage(crate::error::js_message(&err)))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), PortError> {
        self.storage
            .set_item(key, value)
            .map_err(|err| PortError::Storage(crate::error::js_message(&err)))
    }

    fn remove_item(&self, key: &str) -> Result<(), PortError> {
        self.storage
            .remove_item(key)
            .map_err(|err| PortError::Storage(crate::error::js_message(&err)))
    }
}

/// Adapter for the `writeToLocalStorage` port.
#[derive(Debug)]
pub struct StoragePort<S> {
    store: S,
}

impl<S: KeyValueStore> StoragePort<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Apply one persist message: write pretty JSON, or remove on null.
    ///
    /// # Errors
    ///
    /// Returns serialization and store failures unchanged.
    pub fn on_persist_request(&self, request: StorageWriteRequest) -> Result<(), PortError> {
        let StorageWriteRequest { key, value } = request;
        match value {
            Some(value) => {
                let raw = serde_json::to_string_pretty(&value)?;
                self.store.set_item(&key, &raw).inspect_err(|err| {
                    log::warn!("storage: write of {key} failed: {err}");
                })
            }
            None => {
                log::debug!("storage: removing {key}");
                self.store.remove_item(&key)
            }
        }
    }

    /// Read a persisted value back, `None` when the key is absent.
    ///
    /// # Errors
    ///
    /// Returns an error when the store fails or the stored text does not
    /// deserialize into `T`.
    pub fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, PortError> {
        let Some(raw) = self.store.get_item(key)? else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }
}
