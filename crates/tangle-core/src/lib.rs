//! Accelerator core: the cache-then-node request flow.
//!
//! An inbound request is decoded by the wire codec, the cache is consulted
//! with a key derived from the request-identifying hash, and only misses
//! reach the ledger node; fetched results populate the cache write-once
//! before the response is returned.

pub mod config;
pub mod node;
pub mod ops;

pub use config::CacheConfig;
pub use node::NodeClient;
