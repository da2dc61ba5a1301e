//! Backend abstraction behind the cache store.

use std::collections::HashMap;

use parking_lot::Mutex;

use tangle_types::Result;

/// A key-value backend usable from concurrent request handlers.
///
/// Results mirror the wire protocol, not the cache policy: a missing key is
/// `Ok(None)`, a refused write is `Ok(false)`. [`crate::CacheStore`] maps
/// those shapes onto the error taxonomy.
pub trait CacheBackend: Send + Sync {
    /// Look up `key`. `Ok(None)` when the backend does not know the key.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `key` only if absent (set-if-not-exists). Returns `false` when
    /// the key already existed; the stored value is left unchanged.
    fn set_nx(&self, key: &str, value: &str) -> Result<bool>;

    /// Remove `key`. Returns `false` when nothing was removed.
    fn del(&self, key: &str) -> Result<bool>;
}

/// In-memory backend for tests and cache-less embedding.
#[derive(Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CacheBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set_nx(&self, key: &str, value: &str) -> Result<bool> {
        let mut entries = self.entries.lock();
        if entries.contains_key(key) {
            return Ok(false);
        }
        entries.insert(key.to_string(), value.to_string());
        Ok(true)
    }

    fn del(&self, key: &str) -> Result<bool> {
        Ok(self.entries.lock().remove(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_backend_set_nx_refuses_overwrite() {
        let backend = MemoryBackend::new();
        assert!(backend.set_nx("k", "v1").unwrap());
        assert!(!backend.set_nx("k", "v2").unwrap());
        assert_eq!(backend.get("k").unwrap().as_deref(), Some("v1"));
    }

    #[test]
    fn test_memory_backend_del() {
        let backend = MemoryBackend::new();
        assert!(!backend.del("missing").unwrap());
        backend.set_nx("k", "v").unwrap();
        assert!(backend.del("k").unwrap());
        assert_eq!(backend.get("k").unwrap(), None);
    }
}
