// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Best-effort persistence of named values.
//!
//! [`Storage`] never returns an error. Reads that fail or find nothing come
//! back as `None`, writes that fail are logged and dropped, so the in-memory
//! state stays authoritative for the session.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::constants::resolve_key;
use crate::error::StorageError;

/// A local string-to-string store.
pub trait KeyValueBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
    fn clear(&self) -> Result<(), StorageError>;
}

impl<T: KeyValueBackend + ?Sized> KeyValueBackend for Rc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }

    fn clear(&self) -> Result<(), StorageError> {
        (**self).clear()
    }
}

/// In-process backend. With a quota it refuses writes that would push the
/// total size of keys and values past the limit, like browser local storage.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: RefCell<BTreeMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(limit: usize) -> Self {
        Self {
            entries: RefCell::default(),
            quota: Some(limit),
        }
    }

    /// Raw contents, for inspection.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    fn used_without(&self, key: &str) -> usize {
        self.entries
            .borrow()
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl KeyValueBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if let Some(limit) = self.quota {
            let needed = self.used_without(key) + key.len() + value.len();
            if needed > limit {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    limit,
                });
            }
        }
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.entries.borrow_mut().clear();
        Ok(())
    }
}

/// Cheap-clone handle over a shared backend.
#[derive(Clone)]
pub struct Storage {
    backend: Rc<dyn KeyValueBackend>,
}

impl Storage {
    pub fn new(backend: impl KeyValueBackend + 'static) -> Self {
        Self {
            backend: Rc::new(backend),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::new())
    }

    /// Reads and JSON-decodes a value. Missing, empty, or undecodable
    /// entries all read as `None`.
    pub fn load<T: DeserializeOwned>(&self, key: impl AsRef<str>) -> Option<T> {
        let name = key.as_ref();
        let raw = self.load_string(name)?;
        if raw.is_empty() {
            return None;
        }
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::error!(key = name, error = %e, "discarding unreadable stored value");
                None
            }
        }
    }

    /// JSON-encodes and writes a value; failures are logged.
    pub fn save<T: Serialize + ?Sized>(&self, key: impl AsRef<str>, value: &T) {
        let name = key.as_ref();
        let encoded = match serde_json::to_string(value) {
            Ok(s) => s,
            Err(source) => {
                let e = StorageError::Encode {
                    key: name.to_string(),
                    source,
                };
                tracing::error!(error = %e, "value not saved");
                return;
            }
        };
        self.save_string(name, &encoded);
    }

    pub fn load_string(&self, key: impl AsRef<str>) -> Option<String> {
        let name = key.as_ref();
        match self.backend.get(resolve_key(name)) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!(key = name, error = %e, "error loading value");
                None
            }
        }
    }

    pub fn save_string(&self, key: impl AsRef<str>, value: &str) {
        let name = key.as_ref();
        match self.backend.set(resolve_key(name), value) {
            Ok(()) => tracing::trace!(key = name, bytes = value.len(), "saved"),
            Err(e) => tracing::error!(key = name, error = %e, "error saving value"),
        }
    }

    pub fn remove(&self, key: impl AsRef<str>) {
        let name = key.as_ref();
        if let Err(e) = self.backend.remove(resolve_key(name)) {
            tracing::error!(key = name, error = %e, "error removing value");
        }
    }

    pub fn clear(&self) {
        if let Err(e) = self.backend.clear() {
            tracing::error!(error = %e, "error clearing storage");
        }
    }
}
