//! Cart persistence
//!
//! The cart lives in a single named slot of a key-value storage. The storage itself is an injected
//! capability so the same store works against browser `localStorage`, files, or memory.

use std::rc::Rc;

use thiserror::Error;
use tracing::{debug, warn};

use crate::cart::{Cart, LineItem};

mod memory;

pub use memory::MemoryStorage;

/// Storage key holding the serialized cart.
pub const CART_STORAGE_KEY: &str = "premium_shop_cart_v1";

/// Errors raised by a key-value storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The storage backend is not available in this environment.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// The backend refused a write (for example, because its quota is exhausted).
    #[error("failed to write storage key {key}: {reason}")]
    Write {
        /// Key being written
        key: String,

        /// Backend-provided reason
        reason: String,
    },

    /// Filesystem error from a file-backed storage.
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while persisting a cart.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Wrapped storage backend error.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The cart could not be serialized.
    #[error("failed to encode cart: {0}")]
    Encode(#[from] serde_json::Error),
}

/// String key-value storage with synchronous reads and writes.
pub trait KeyValueStorage {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` if the backend rejects the write.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` if the backend rejects the removal.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStorage + ?Sized> KeyValueStorage for &T {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

impl<T: KeyValueStorage + ?Sized> KeyValueStorage for Rc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// Serialize a cart into its slot representation (a JSON array of `{id, title, price, qty}`).
///
/// # Errors
///
/// Returns a `serde_json::Error` if a line item cannot be serialized.
pub fn encode_cart(cart: &Cart) -> Result<String, serde_json::Error> {
    serde_json::to_string(cart)
}

/// Parse a slot value into a cart, restoring the cart invariants.
///
/// # Errors
///
/// Returns a `serde_json::Error` if the value is not a JSON array of line items.
pub fn decode_cart(raw: &str) -> Result<Cart, serde_json::Error> {
    let items: Vec<LineItem> = serde_json::from_str(raw)?;

    Ok(Cart::from_items(items))
}

/// Loads and saves the cart held in one storage slot.
#[derive(Debug, Clone)]
pub struct CartStore<S> {
    storage: S,
    key: String,
}

impl<S: KeyValueStorage> CartStore<S> {
    /// Create a store using the default cart slot.
    #[must_use]
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, CART_STORAGE_KEY)
    }

    /// Create a store using a custom slot key.
    #[must_use]
    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Read the cart from the slot.
    ///
    /// An absent, unreadable, or malformed slot yields an empty cart.
    pub fn load(&self) -> Cart {
        let raw = match self.storage.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Cart::new(),
            Err(source) => {
                warn!("failed to read cart slot {}: {source}", self.key);

                return Cart::new();
            }
        };

        match decode_cart(&raw) {
            Ok(cart) => cart,
            Err(source) => {
                debug!("ignoring malformed cart slot {}: {source}", self.key);

                Cart::new()
            }
        }
    }

    /// Overwrite the slot with the given cart.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the cart cannot be encoded or the storage rejects the write.
    pub fn save(&self, cart: &Cart) -> Result<(), StoreError> {
        let raw = encode_cart(cart)?;

        self.storage.set(&self.key, &raw)?;

        Ok(())
    }

    /// Remove the slot entirely.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the storage rejects the removal.
    pub fn clear(&self) -> Result<(), StoreError> {
        self.storage.remove(&self.key)?;

        Ok(())
    }

    /// Total number of units in the stored cart.
    pub fn count(&self) -> u64 {
        self.load().count()
    }

    /// Slot key used by this store.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}
