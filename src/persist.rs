//! Persistence: the storage adapter trait and its backends.
//!
//! The engine core never touches browser storage directly; it reads and
//! writes through [`ShapeStorage`] so the interaction logic stays
//! storage-agnostic and testable without a browser. [`WebStorage`] backs onto
//! `localStorage`; [`MemoryStorage`] is the in-process double used by tests.
//!
//! The payload is the plain JSON array of shape records described in
//! [`crate::shape`]. An absent payload loads as `None`; a malformed one is an
//! error the caller discards (and logs) rather than crashes on.

#[cfg(test)]
#[path = "persist_test.rs"]
mod persist_test;

use std::cell::RefCell;

use thiserror::Error;
use wasm_bindgen::JsValue;

use crate::shape::Shape;

/// `localStorage` key the drawing is saved under.
pub const STORAGE_KEY: &str = "drawing";

/// Failure while saving or loading a drawing.
#[derive(Debug, Error)]
pub enum StorageError {
    /// No browser window or `localStorage` is disabled.
    #[error("browser storage is unavailable")]
    Unavailable,
    /// The storage backend rejected the operation (e.g. quota exceeded).
    #[error("storage backend error: {0}")]
    Backend(String),
    /// The payload could not be encoded or decoded.
    #[error("invalid drawing payload: {0}")]
    Payload(#[from] serde_json::Error),
}

impl From<StorageError> for JsValue {
    fn from(err: StorageError) -> Self {
        Self::from_str(&err.to_string())
    }
}

/// Load/save adapter for a shape collection.
pub trait ShapeStorage {
    /// Persist the shapes, replacing any previous drawing.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails or the backend rejects the write.
    fn save(&self, shapes: &[Shape]) -> Result<(), StorageError>;

    /// Load the persisted shapes, or `None` if nothing was saved.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails or the payload is malformed.
    fn load(&self) -> Result<Option<Vec<Shape>>, StorageError>;

    /// Delete the persisted drawing.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the delete.
    fn clear(&self) -> Result<(), StorageError>;
}

/// Browser `localStorage` backend.
pub struct WebStorage {
    storage: web_sys::Storage,
    key: String,
}

impl WebStorage {
    /// Open the window's `localStorage` under the default drawing key.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] outside a browser window or when
    /// storage access is denied.
    pub fn from_window() -> Result<Self, StorageError> {
        let storage = web_sys::window()
            .ok_or(StorageError::Unavailable)?
            .local_storage()
            .map_err(js_error)?
            .ok_or(StorageError::Unavailable)?;
        Ok(Self { storage, key: STORAGE_KEY.to_owned() })
    }
}

impl ShapeStorage for WebStorage {
    fn save(&self, shapes: &[Shape]) -> Result<(), StorageError> {
        let payload = serde_json::to_string(shapes)?;
        self.storage.set_item(&self.key, &payload).map_err(js_error)
    }

    fn load(&self) -> Result<Option<Vec<Shape>>, StorageError> {
        match self.storage.get_item(&self.key).map_err(js_error)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove_item(&self.key).map_err(js_error)
    }
}

/// In-memory backend mirroring [`WebStorage`] semantics, including the raw
/// string round-trip through JSON.
#[derive(Default)]
pub struct MemoryStorage {
    slot: RefCell<Option<String>>,
}

impl MemoryStorage {
    /// Create an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the raw payload directly, bypassing encoding. Lets tests exercise
    /// malformed-payload handling.
    pub fn set_raw(&self, raw: impl Into<String>) {
        *self.slot.borrow_mut() = Some(raw.into());
    }

    /// The raw payload as last saved, if any.
    #[must_use]
    pub fn raw(&self) -> Option<String> {
        self.slot.borrow().clone()
    }
}

impl ShapeStorage for MemoryStorage {
    fn save(&self, shapes: &[Shape]) -> Result<(), StorageError> {
        let payload = serde_json::to_string(shapes)?;
        *self.slot.borrow_mut() = Some(payload);
        Ok(())
    }

    fn load(&self) -> Result<Option<Vec<Shape>>, StorageError> {
        match self.slot.borrow().as_deref() {
            Some(raw) => Ok(Some(serde_json::from_str(raw)?)),
            None => Ok(None),
        }
    }

    fn clear(&self) -> Result<(), StorageError> {
        *self.slot.borrow_mut() = None;
        Ok(())
    }
}

fn js_error(value: JsValue) -> StorageError {
    StorageError::Backend(format!("{value:?}"))
}
