//! Response value objects.
//!
//! Collection kinds are part of the wire contract: tips are a LIFO stack
//! (last push serializes first); generated addresses and found hashes are
//! FIFO queues. Every container owns its buffers/records exclusively.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::ternary::{TernaryBuffer, HASH_TRITS};
use crate::transaction::Transaction;

/// Validate the 243-trit hash role shared by every hash-carrying container.
pub(crate) fn checked_hash(hash: TernaryBuffer) -> Result<TernaryBuffer> {
    if hash.num_trits() != HASH_TRITS {
        return Err(Error::LengthMismatch {
            expected: HASH_TRITS,
            actual: hash.num_trits(),
        });
    }
    Ok(hash)
}

/// Tip hashes, a LIFO stack: the most recently pushed tip serializes first.
#[derive(Debug, Default)]
pub struct GetTipsResponse {
    tips: Vec<TernaryBuffer>,
}

impl GetTipsResponse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a 243-trit tip hash onto the stack.
    pub fn push(&mut self, tip: TernaryBuffer) -> Result<()> {
        self.tips.push(checked_hash(tip)?);
        Ok(())
    }

    /// Iterate in pop (LIFO) order: last push first.
    pub fn iter_lifo(&self) -> impl Iterator<Item = &TernaryBuffer> {
        self.tips.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.tips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tips.is_empty()
    }
}

/// Generated addresses, a FIFO queue.
#[derive(Debug, Default)]
pub struct GenerateAddressResponse {
    addresses: VecDeque<TernaryBuffer>,
}

impl GenerateAddressResponse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a 243-trit address.
    pub fn push(&mut self, address: TernaryBuffer) -> Result<()> {
        self.addresses.push_back(checked_hash(address)?);
        Ok(())
    }

    /// Iterate in arrival (FIFO) order.
    pub fn iter(&self) -> impl Iterator<Item = &TernaryBuffer> {
        self.addresses.iter()
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }
}

/// Hashes of found transactions, a FIFO queue.
#[derive(Debug, Default)]
pub struct FindTransactionsResponse {
    hashes: VecDeque<TernaryBuffer>,
}

impl FindTransactionsResponse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a 243-trit transaction hash.
    pub fn push(&mut self, hash: TernaryBuffer) -> Result<()> {
        self.hashes.push_back(checked_hash(hash)?);
        Ok(())
    }

    /// Iterate in arrival (FIFO) order.
    pub fn iter(&self) -> impl Iterator<Item = &TernaryBuffer> {
        self.hashes.iter()
    }

    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }
}

/// Full transaction objects, kept in insertion order.
#[derive(Debug, Default)]
pub struct FindTransactionObjectsResponse {
    txns: Vec<Transaction>,
}

impl FindTransactionObjectsResponse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, txn: Transaction) {
        self.txns.push(txn);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.txns.iter()
    }

    pub fn len(&self) -> usize {
        self.txns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.txns.is_empty()
    }
}

/// Result of a submitted transfer: the hash of the attached transaction.
#[derive(Debug, Clone)]
pub struct SendTransferResponse {
    hash: TernaryBuffer,
}

impl SendTransferResponse {
    pub fn new(hash: TernaryBuffer) -> Result<Self> {
        Ok(Self {
            hash: checked_hash(hash)?,
        })
    }

    pub fn hash(&self) -> &TernaryBuffer {
        &self.hash
    }
}

/// Status of a buffered request looked up by UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    /// Buffered but not yet broadcast.
    Unsent,
    /// No request with the given UUID.
    NotExist,
    /// Broadcast to the ledger.
    Sent,
}

/// Buffered-request lookup result: status token plus the buffered bundle.
#[derive(Debug)]
pub struct FetchTxnWithUuidResponse {
    pub status: RequestStatus,
    bundle: Vec<Transaction>,
}

impl FetchTxnWithUuidResponse {
    pub fn new(status: RequestStatus) -> Self {
        Self {
            status,
            bundle: Vec::new(),
        }
    }

    pub fn push(&mut self, txn: Transaction) {
        self.bundle.push(txn);
    }

    pub fn bundle(&self) -> impl Iterator<Item = &Transaction> {
        self.bundle.iter()
    }

    pub fn bundle_len(&self) -> usize {
        self.bundle.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hash(fill: char) -> TernaryBuffer {
        TernaryBuffer::from_trytes_exact(&fill.to_string().repeat(81), HASH_TRITS).unwrap()
    }

    #[test]
    fn test_tips_pop_order_is_lifo() {
        let mut res = GetTipsResponse::new();
        res.push(hash('A')).unwrap();
        res.push(hash('B')).unwrap();
        let order: Vec<String> = res.iter_lifo().map(|t| t.to_trytes()).collect();
        assert_eq!(order, vec!["B".repeat(81), "A".repeat(81)]);
    }

    #[test]
    fn test_addresses_are_fifo() {
        let mut res = GenerateAddressResponse::new();
        res.push(hash('A')).unwrap();
        res.push(hash('B')).unwrap();
        let order: Vec<String> = res.iter().map(|t| t.to_trytes()).collect();
        assert_eq!(order, vec!["A".repeat(81), "B".repeat(81)]);
    }

    #[test]
    fn test_short_tip_rejected() {
        let mut res = GetTipsResponse::new();
        let result = res.push(TernaryBuffer::from_trytes("AAA").unwrap());
        assert!(matches!(result, Err(Error::LengthMismatch { .. })));
    }
}
