//! Key-Value Storage
//!
//! Best-effort persistence slots. The browser implementation wraps
//! `window.localStorage`; the in-memory one backs tests and browsers where
//! local storage is disabled.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde::Serialize;
use thiserror::Error;

/// Storage layer errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("local storage is unavailable")]
    Unavailable,
    #[error("failed to read slot `{key}`: {message}")]
    Read { key: String, message: String },
    #[error("failed to write slot `{key}`: {message}")]
    Write { key: String, message: String },
    #[error("failed to serialize state: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A string slot store keyed by fixed constants
pub trait KeyValueStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// `window.localStorage`
pub struct BrowserStorage {
    inner: web_sys::Storage,
}

impl BrowserStorage {
    pub fn open() -> Result<Self, StorageError> {
        let window = web_sys::window().ok_or(StorageError::Unavailable)?;
        let inner = window
            .local_storage()
            .map_err(|_| StorageError::Unavailable)?
            .ok_or(StorageError::Unavailable)?;
        Ok(Self { inner })
    }
}

impl KeyValueStorage for BrowserStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get_item(key).map_err(|e| StorageError::Read {
            key: key.to_string(),
            message: format!("{:?}", e),
        })
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.inner.set_item(key, value).map_err(|e| StorageError::Write {
            key: key.to_string(),
            message: format!("{:?}", e),
        })
    }
}

/// In-memory slots; clones share the same map
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    slots: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slots.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.slots.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Local storage when the browser provides it, memory otherwise
pub fn default_storage() -> Box<dyn KeyValueStorage> {
    match BrowserStorage::open() {
        Ok(storage) => Box::new(storage),
        Err(e) => {
            log::warn!("{}; state will not survive a reload", e);
            Box::new(MemoryStorage::new())
        }
    }
}

/// Read a slot, treating read failures as "nothing stored"
pub fn read_slot(storage: &dyn KeyValueStorage, key: &str) -> Option<String> {
    match storage.get_item(key) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("{}", e);
            None
        }
    }
}

/// Serialize and store a value; failures are logged and dropped
pub fn write_slot<T: Serialize>(storage: &dyn KeyValueStorage, key: &str, value: &T) {
    let result = serde_json::to_string(value)
        .map_err(StorageError::from)
        .and_then(|json| storage.set_item(key, &json));
    if let Err(e) = result {
        log::warn!("{}", e);
    }
}

/// Storage whose every call fails
#[cfg(test)]
pub(crate) struct BrokenStorage;

#[cfg(test)]
impl KeyValueStorage for BrokenStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Read { key: key.to_string(), message: "denied".to_string() })
    }

    fn set_item(&self, key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Write { key: key.to_string(), message: "quota".to_string() })
    }
}
