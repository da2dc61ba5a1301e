//! Shared types for the tangle accelerator workspace.
//!
//! This crate provides the foundational types used across the workspace:
//! - [`TernaryBuffer`](ternary::TernaryBuffer) - fixed-width packed ternary value
//! - [`Transaction`](transaction::Transaction) - ledger transaction record with presence mask
//! - [`request`] / [`response`] - typed request/response value objects
//! - [`Error`](error::Error) - the shared error taxonomy

pub mod error;
pub mod request;
pub mod response;
pub mod ternary;
pub mod transaction;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use request::{FindTransactionObjectsRequest, SendTransferRequest};
pub use response::{
    FetchTxnWithUuidResponse, FindTransactionObjectsResponse, FindTransactionsResponse,
    GenerateAddressResponse, GetTipsResponse, RequestStatus, SendTransferResponse,
};
pub use ternary::{
    TernaryBuffer, HASH_TRITS, NONCE_TRITS, SIGNATURE_TRITS, TAG_TRITS, TRITS_PER_TRYTE,
};
pub use transaction::{FieldMask, Transaction};
