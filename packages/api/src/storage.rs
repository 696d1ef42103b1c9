//! Where the client keeps the session between page loads.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::error::AuthError;

/// Key/value storage for the serialized session.
pub trait SessionStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, AuthError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), AuthError>;
    fn remove_item(&self, key: &str) -> Result<(), AuthError>;
}

/// In-memory storage for tests, native builds, and `persist_session = false`.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    items: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> AuthError {
    AuthError::Storage("memory storage lock poisoned".to_string())
}

impl SessionStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, AuthError> {
        Ok(self.items.lock().map_err(poisoned)?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), AuthError> {
        self.items
            .lock()
            .map_err(poisoned)?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), AuthError> {
        self.items.lock().map_err(poisoned)?.remove(key);
        Ok(())
    }
}

/// Browser `localStorage`.
#[cfg(target_arch = "wasm32")]
#[derive(Clone, Debug, Default)]
pub struct LocalStorage;

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Result<web_sys::Storage, AuthError> {
        web_sys::window()
            .ok_or_else(|| AuthError::Browser("no window".to_string()))?
            .local_storage()
            .map_err(|e| AuthError::Storage(format!("{e:?}")))?
            .ok_or_else(|| AuthError::Storage("localStorage unavailable".to_string()))
    }
}

#[cfg(target_arch = "wasm32")]
impl SessionStorage for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, AuthError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| AuthError::Storage(format!("{e:?}")))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), AuthError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| AuthError::Storage(format!("{e:?}")))
    }

    fn remove_item(&self, key: &str) -> Result<(), AuthError> {
        Self::storage()?
            .remove_item(key)
            .map_err(|e| AuthError::Storage(format!("{e:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get_item("k").unwrap(), None);

        storage.set_item("k", "v1").unwrap();
        storage.set_item("k", "v2").unwrap();
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("v2"));

        // Clones share the same backing map
        let other = storage.clone();
        other.remove_item("k").unwrap();
        assert_eq!(storage.get_item("k").unwrap(), None);
    }
}
