//! Cache backend settings resolved by the composition root.

use tangle_cache::CacheStore;
use tangle_types::Result;

/// Resolved cache settings handed to [`CacheStore::init`].
///
/// The surrounding process owns host/port/enabled resolution; this type only
/// carries the result (plus an env-var convenience for simple deployments).
#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub enabled: bool,
    pub host: String,
    pub port: u16,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            host: "localhost".to_string(),
            port: 6379,
        }
    }
}

impl CacheConfig {
    /// Read `TA_CACHE_ENABLED`, `TA_CACHE_HOST` and `TA_CACHE_PORT`,
    /// falling back to defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(v) = std::env::var("TA_CACHE_ENABLED") {
            config.enabled = matches!(v.as_str(), "1" | "true" | "yes");
        }
        if let Ok(v) = std::env::var("TA_CACHE_HOST") {
            config.host = v;
        }
        if let Ok(v) = std::env::var("TA_CACHE_PORT") {
            if let Ok(port) = v.parse() {
                config.port = port;
            }
        }
        config
    }

    /// Initialize `store` with these settings.
    pub fn init_store(&self, store: &CacheStore) -> Result<()> {
        store.init(self.enabled, &self.host, self.port)
    }
}
