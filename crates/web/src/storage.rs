//! `localStorage`-backed key-value storage.

use storefront::store::{KeyValueStorage, StorageError};
use wasm_bindgen::JsValue;

/// Key-value storage over the window's `localStorage`.
///
/// The storage handle is looked up on every call, so a page where storage is blocked still
/// renders and reads as an empty cart.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct BrowserStorage;

impl BrowserStorage {
    pub(crate) fn new() -> Self {
        Self
    }

    fn storage() -> Result<web_sys::Storage, StorageError> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("window is unavailable".to_string()))?;

        window
            .local_storage()
            .map_err(|error| StorageError::Unavailable(js_value_message(&error, "access denied")))?
            .ok_or_else(|| StorageError::Unavailable("localStorage is disabled".to_string()))
    }
}

impl KeyValueStorage for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::storage()?
            .get_item(key)
            .map_err(|error| StorageError::Unavailable(js_value_message(&error, "read failed")))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|error| StorageError::Write {
                key: key.to_string(),
                reason: js_value_message(&error, "quota exceeded"),
            })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        Self::storage()?
            .remove_item(key)
            .map_err(|error| StorageError::Write {
                key: key.to_string(),
                reason: js_value_message(&error, "remove failed"),
            })
    }
}

pub(crate) fn js_value_message(error: &JsValue, fallback: &str) -> String {
    error.as_string().unwrap_or_else(|| fallback.to_string())
}
