//! Write-once key-value cache consulted in front of the ledger node.
//!
//! The store is a three-state machine (`Uninitialized -> Active -> Stopped`)
//! over a pluggable [`CacheBackend`]. Entries have no expiry: ledger
//! transactions are immutable once known, so writes are set-if-not-exists and
//! there is no invalidation beyond explicit delete.
//!
//! Not-found on `get` is reported as [`Error::BackendError`], the same as any
//! backend fault: callers branch once and fall through to the ledger node.

pub mod backend;
pub mod redis;

pub use backend::{CacheBackend, MemoryBackend};
pub use redis::RedisBackend;

use parking_lot::RwLock;
use tracing::trace;

use tangle_types::{Error, Result};

enum State {
    Uninitialized,
    Active(Box<dyn CacheBackend>),
    Stopped,
}

/// A cache store shared by all concurrent request handlers.
///
/// One value is created by the process's composition root and passed by
/// reference into every request-handling call; no global state.
pub struct CacheStore {
    state: RwLock<State>,
}

impl CacheStore {
    /// A store in the `Uninitialized` state; every operation fails with
    /// [`Error::CacheDisabled`] until [`CacheStore::init`] succeeds.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(State::Uninitialized),
        }
    }

    /// Connect the reference backend and transition to `Active`.
    ///
    /// With `enabled == false` the store stays `Uninitialized` and returns
    /// `Ok(())`: a disabled cache is configuration, not a fault. A connect
    /// failure is [`Error::BackendError`] and also leaves the store
    /// `Uninitialized`. Calling after [`CacheStore::stop`] fails with
    /// [`Error::CacheDisabled`].
    pub fn init(&self, enabled: bool, host: &str, port: u16) -> Result<()> {
        if !enabled {
            return Ok(());
        }
        let mut state = self.state.write();
        match *state {
            State::Active(_) => Ok(()),
            State::Stopped => Err(Error::CacheDisabled),
            State::Uninitialized => {
                let backend = RedisBackend::connect(host, port)?;
                *state = State::Active(Box::new(backend));
                Ok(())
            }
        }
    }

    /// Activate with a caller-supplied backend. Substitution seam for tests
    /// and alternative backends.
    pub fn init_with_backend(&self, backend: Box<dyn CacheBackend>) {
        *self.state.write() = State::Active(backend);
    }

    /// Release the backend. Idempotent; every later operation fails with
    /// [`Error::CacheDisabled`].
    pub fn stop(&self) {
        *self.state.write() = State::Stopped;
    }

    pub fn is_active(&self) -> bool {
        matches!(*self.state.read(), State::Active(_))
    }

    fn with_backend<T>(
        &self,
        key: &str,
        f: impl FnOnce(&dyn CacheBackend) -> Result<T>,
    ) -> Result<T> {
        let state = self.state.read();
        let State::Active(backend) = &*state else {
            return Err(Error::CacheDisabled);
        };
        if key.is_empty() {
            return Err(Error::CacheNullKey);
        }
        f(backend.as_ref())
    }

    /// Fetch the payload stored under `key`.
    ///
    /// A key the backend does not know is a [`Error::BackendError`], not a
    /// typed miss (merged not-found semantics).
    pub fn get(&self, key: &str) -> Result<String> {
        self.with_backend(key, |backend| match backend.get(key)? {
            Some(value) => {
                trace!("cache hit for {key}");
                Ok(value)
            }
            None => Err(Error::BackendError(format!("key not found: {key}"))),
        })
    }

    /// Store `value` under `key`, write-once.
    ///
    /// A key that already exists is a [`Error::BackendError`] and the stored
    /// value is left unchanged: a second writer observing the same key wrote
    /// a duplicate, not fresher data.
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        self.with_backend(key, |backend| {
            if !backend.set_nx(key, value)? {
                return Err(Error::BackendError(format!("key already exists: {key}")));
            }
            trace!("cached {key}");
            Ok(())
        })
    }

    /// Delete `key` unconditionally. Zero keys removed is a
    /// [`Error::BackendError`].
    pub fn del(&self, key: &str) -> Result<()> {
        self.with_backend(key, |backend| {
            if !backend.del(key)? {
                return Err(Error::BackendError(format!("no keys removed: {key}")));
            }
            Ok(())
        })
    }
}

impl Default for CacheStore {
    fn default() -> Self {
        Self::new()
    }
}
