//! Ledger transaction record with a field-presence mask.
//!
//! A record carries up to sixteen fields split across four groups; a field
//! must not reach the wire unless its owning group bit is set. Setters keep
//! the mask consistent so callers never OR bits by hand.

use crate::error::{Error, Result};
use crate::ternary::{TernaryBuffer, HASH_TRITS, NONCE_TRITS, SIGNATURE_TRITS, TAG_TRITS};

/// Presence mask over the four field groups of a [`Transaction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldMask(u8);

impl FieldMask {
    /// No group populated.
    pub const NONE: FieldMask = FieldMask(0);
    /// address, value, obsolete_tag, timestamp, current_index, last_index, bundle_hash
    pub const ESSENCE: FieldMask = FieldMask(1 << 0);
    /// trunk, branch, tag, attachment timestamps, nonce
    pub const ATTACHMENT: FieldMask = FieldMask(1 << 1);
    /// hash
    pub const CONSENSUS: FieldMask = FieldMask(1 << 2);
    /// signature_and_message_fragment
    pub const DATA: FieldMask = FieldMask(1 << 3);
    /// All four groups.
    pub const ALL: FieldMask = FieldMask(0b1111);

    /// True when every group bit of `other` is set in `self`.
    pub fn contains(self, other: FieldMask) -> bool {
        self.0 & other.0 == other.0
    }

    /// OR the group bits of `other` into `self`.
    pub fn insert(&mut self, other: FieldMask) {
        self.0 |= other.0;
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for FieldMask {
    type Output = FieldMask;

    fn bitor(self, rhs: FieldMask) -> FieldMask {
        FieldMask(self.0 | rhs.0)
    }
}

/// An in-memory ledger transaction record.
///
/// Created empty ([`Transaction::new`]); fields are populated incrementally
/// by setters that validate trit lengths and imply group membership in the
/// mask. Buffers are owned exclusively by the record and released with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    hash: TernaryBuffer,
    signature_and_message_fragment: TernaryBuffer,
    address: TernaryBuffer,
    value: i64,
    obsolete_tag: TernaryBuffer,
    timestamp: u64,
    current_index: u64,
    last_index: u64,
    bundle_hash: TernaryBuffer,
    trunk: TernaryBuffer,
    branch: TernaryBuffer,
    tag: TernaryBuffer,
    attachment_timestamp: i64,
    attachment_timestamp_lower: i64,
    attachment_timestamp_upper: i64,
    nonce: TernaryBuffer,
    mask: FieldMask,
}

impl Transaction {
    /// An empty record: zeroed buffers, zero scalars, empty mask.
    pub fn new() -> Self {
        Self {
            hash: TernaryBuffer::zero(HASH_TRITS),
            signature_and_message_fragment: TernaryBuffer::zero(SIGNATURE_TRITS),
            address: TernaryBuffer::zero(HASH_TRITS),
            value: 0,
            obsolete_tag: TernaryBuffer::zero(TAG_TRITS),
            timestamp: 0,
            current_index: 0,
            last_index: 0,
            bundle_hash: TernaryBuffer::zero(HASH_TRITS),
            trunk: TernaryBuffer::zero(HASH_TRITS),
            branch: TernaryBuffer::zero(HASH_TRITS),
            tag: TernaryBuffer::zero(TAG_TRITS),
            attachment_timestamp: 0,
            attachment_timestamp_lower: 0,
            attachment_timestamp_upper: 0,
            nonce: TernaryBuffer::zero(NONCE_TRITS),
            mask: FieldMask::NONE,
        }
    }

    fn checked(buf: TernaryBuffer, expected: usize) -> Result<TernaryBuffer> {
        if buf.num_trits() != expected {
            return Err(Error::LengthMismatch {
                expected,
                actual: buf.num_trits(),
            });
        }
        Ok(buf)
    }

    // ------------------------------------------------------------------
    // consensus group
    // ------------------------------------------------------------------

    pub fn set_hash(&mut self, hash: TernaryBuffer) -> Result<()> {
        self.hash = Self::checked(hash, HASH_TRITS)?;
        self.mask.insert(FieldMask::CONSENSUS);
        Ok(())
    }

    // ------------------------------------------------------------------
    // data group
    // ------------------------------------------------------------------

    pub fn set_signature_and_message_fragment(&mut self, fragment: TernaryBuffer) -> Result<()> {
        self.signature_and_message_fragment = Self::checked(fragment, SIGNATURE_TRITS)?;
        self.mask.insert(FieldMask::DATA);
        Ok(())
    }

    // ------------------------------------------------------------------
    // essence group
    // ------------------------------------------------------------------

    pub fn set_address(&mut self, address: TernaryBuffer) -> Result<()> {
        self.address = Self::checked(address, HASH_TRITS)?;
        self.mask.insert(FieldMask::ESSENCE);
        Ok(())
    }

    pub fn set_value(&mut self, value: i64) {
        self.value = value;
        self.mask.insert(FieldMask::ESSENCE);
    }

    pub fn set_obsolete_tag(&mut self, tag: TernaryBuffer) -> Result<()> {
        self.obsolete_tag = Self::checked(tag, TAG_TRITS)?;
        self.mask.insert(FieldMask::ESSENCE);
        Ok(())
    }

    pub fn set_timestamp(&mut self, timestamp: u64) {
        self.timestamp = timestamp;
        self.mask.insert(FieldMask::ESSENCE);
    }

    pub fn set_current_index(&mut self, index: u64) {
        self.current_index = index;
        self.mask.insert(FieldMask::ESSENCE);
    }

    pub fn set_last_index(&mut self, index: u64) {
        self.last_index = index;
        self.mask.insert(FieldMask::ESSENCE);
    }

    pub fn set_bundle_hash(&mut self, bundle: TernaryBuffer) -> Result<()> {
        self.bundle_hash = Self::checked(bundle, HASH_TRITS)?;
        self.mask.insert(FieldMask::ESSENCE);
        Ok(())
    }

    // ------------------------------------------------------------------
    // attachment group
    // ------------------------------------------------------------------

    pub fn set_trunk(&mut self, trunk: TernaryBuffer) -> Result<()> {
        self.trunk = Self::checked(trunk, HASH_TRITS)?;
        self.mask.insert(FieldMask::ATTACHMENT);
        Ok(())
    }

    pub fn set_branch(&mut self, branch: TernaryBuffer) -> Result<()> {
        self.branch = Self::checked(branch, HASH_TRITS)?;
        self.mask.insert(FieldMask::ATTACHMENT);
        Ok(())
    }

    pub fn set_tag(&mut self, tag: TernaryBuffer) -> Result<()> {
        self.tag = Self::checked(tag, TAG_TRITS)?;
        self.mask.insert(FieldMask::ATTACHMENT);
        Ok(())
    }

    pub fn set_attachment_timestamp(&mut self, ts: i64) {
        self.attachment_timestamp = ts;
        self.mask.insert(FieldMask::ATTACHMENT);
    }

    pub fn set_attachment_timestamp_lower(&mut self, ts: i64) {
        self.attachment_timestamp_lower = ts;
        self.mask.insert(FieldMask::ATTACHMENT);
    }

    pub fn set_attachment_timestamp_upper(&mut self, ts: i64) {
        self.attachment_timestamp_upper = ts;
        self.mask.insert(FieldMask::ATTACHMENT);
    }

    pub fn set_nonce(&mut self, nonce: TernaryBuffer) -> Result<()> {
        self.nonce = Self::checked(nonce, NONCE_TRITS)?;
        self.mask.insert(FieldMask::ATTACHMENT);
        Ok(())
    }

    // ------------------------------------------------------------------
    // accessors
    // ------------------------------------------------------------------

    pub fn hash(&self) -> &TernaryBuffer {
        &self.hash
    }

    pub fn signature_and_message_fragment(&self) -> &TernaryBuffer {
        &self.signature_and_message_fragment
    }

    pub fn address(&self) -> &TernaryBuffer {
        &self.address
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn obsolete_tag(&self) -> &TernaryBuffer {
        &self.obsolete_tag
    }

    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    pub fn current_index(&self) -> u64 {
        self.current_index
    }

    pub fn last_index(&self) -> u64 {
        self.last_index
    }

    pub fn bundle_hash(&self) -> &TernaryBuffer {
        &self.bundle_hash
    }

    pub fn trunk(&self) -> &TernaryBuffer {
        &self.trunk
    }

    pub fn branch(&self) -> &TernaryBuffer {
        &self.branch
    }

    pub fn tag(&self) -> &TernaryBuffer {
        &self.tag
    }

    pub fn attachment_timestamp(&self) -> i64 {
        self.attachment_timestamp
    }

    pub fn attachment_timestamp_lower(&self) -> i64 {
        self.attachment_timestamp_lower
    }

    pub fn attachment_timestamp_upper(&self) -> i64 {
        self.attachment_timestamp_upper
    }

    pub fn nonce(&self) -> &TernaryBuffer {
        &self.nonce
    }

    /// Which groups have been populated.
    pub fn mask(&self) -> FieldMask {
        self.mask
    }

    /// Override the presence mask before serialization.
    pub fn set_mask(&mut self, mask: FieldMask) {
        self.mask = mask;
    }

    /// Reset every field and the mask.
    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

impl Default for Transaction {
    fn default() -> Self {
        Self::new()
    }
}
