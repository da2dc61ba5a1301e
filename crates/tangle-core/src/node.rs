//! Ledger node collaborator boundary.

use tangle_types::{SendTransferRequest, TernaryBuffer, Transaction};

/// The ledger node behind the accelerator, treated as a black box.
///
/// Implementations block on network I/O; callers impose deadlines. Transaction
/// validation (signatures, proof-of-work, trunk/branch consistency) is the
/// node's job, never checked on this side.
pub trait NodeClient: Send + Sync {
    /// Fetch a transaction by its 243-trit hash, fully masked.
    /// `Ok(None)` when the node does not know the hash.
    fn get_transaction(&self, hash: &TernaryBuffer) -> anyhow::Result<Option<Transaction>>;

    /// Current tips, in the order the node reports them.
    fn get_tips(&self) -> anyhow::Result<Vec<TernaryBuffer>>;

    /// Hashes of transactions on the given 243-trit address.
    fn find_transactions(&self, address: &TernaryBuffer) -> anyhow::Result<Vec<TernaryBuffer>>;

    /// Attach and broadcast a transfer; returns the new transaction's hash.
    fn send_transfer(&self, req: &SendTransferRequest) -> anyhow::Result<TernaryBuffer>;
}
