//! Request value objects.
//!
//! Each request owns its buffers exclusively; dropping the request releases
//! everything it contains.

use std::collections::VecDeque;

use crate::error::Result;
use crate::response::checked_hash;
use crate::ternary::TernaryBuffer;

/// A decoded send-transfer request.
///
/// `message` and `tag` keep the caller's tryte length; `address` is a full
/// 243-trit address.
#[derive(Debug, Clone)]
pub struct SendTransferRequest {
    pub value: i64,
    pub tag: TernaryBuffer,
    pub message: TernaryBuffer,
    pub address: TernaryBuffer,
}

/// Transaction hashes to look up, consumed front-to-back (FIFO).
#[derive(Debug, Default)]
pub struct FindTransactionObjectsRequest {
    hashes: VecDeque<TernaryBuffer>,
}

impl FindTransactionObjectsRequest {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::ternary::{HASH_TRITS, TAG_TRITS};

    #[test]
    fn test_request_preserves_fifo_order() {
        let mut req = FindTransactionObjectsRequest::new();
        let a = TernaryBuffer::from_trytes_exact(&"A".repeat(81), HASH_TRITS).unwrap();
        let b = TernaryBuffer::from_trytes_exact(&"B".repeat(81), HASH_TRITS).unwrap();
        req.push(a.clone()).unwrap();
        req.push(b.clone()).unwrap();
        let order: Vec<_> = req.iter().collect();
        assert_eq!(order, vec![&a, &b]);
    }

    #[test]
    fn test_request_rejects_short_hash() {
        let mut req = FindTransactionObjectsRequest::new();
        let result = req.push(TernaryBuffer::zero(TAG_TRITS));
        assert!(matches!(result, Err(Error::LengthMismatch { .. })));
        assert!(req.is_empty());
    }
}
