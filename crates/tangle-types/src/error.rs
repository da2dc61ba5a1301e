//! Error taxonomy shared by the codec, cache and core crates.
//!
//! Callers branch on exact variants: cache misses and backend faults share
//! `BackendError`, so the cache-consult path only needs one fall-through arm.

/// Workspace-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// All failures surfaced by the accelerator core.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Input text contains characters outside the tryte alphabet.
    #[error("invalid ternary encoding: {0}")]
    InvalidEncoding(String),

    /// A buffer's trit length does not match its declared role.
    #[error("trit length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Wire text is not valid JSON.
    #[error("malformed json: {0}")]
    MalformedJson(String),

    /// A request payload lacks a mandatory key.
    #[error("missing mandatory field `{0}`")]
    MissingField(&'static str),

    /// A value object could not be rendered to wire text.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The cache store is not in the `Active` state.
    #[error("cache is not active")]
    CacheDisabled,

    /// An empty cache key was supplied.
    #[error("cache key is empty")]
    CacheNullKey,

    /// The cache backend reported a failure (including key-not-found).
    #[error("cache backend error: {0}")]
    BackendError(String),
}
