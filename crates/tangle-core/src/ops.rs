//! Request operations: decode, consult the cache, fall through to the node.
//!
//! Error policy: codec failures abort the whole request; cache failures never
//! do. A failed `get` falls through to the node, a failed `set` is logged and
//! swallowed - failing to cache must never fail a response already computed.

use tracing::{debug, warn};

use tangle_cache::CacheStore;
use tangle_serializer::{
    deserialize_send_transfer, deserialize_transaction, serialize_find_transactions,
    serialize_get_tips, serialize_send_transfer, serialize_transaction,
    serialize_transaction_list,
};
use tangle_types::{
    FieldMask, FindTransactionObjectsRequest, FindTransactionObjectsResponse,
    FindTransactionsResponse, GetTipsResponse, SendTransferResponse, TernaryBuffer, Transaction,
};

use crate::node::NodeClient;

/// Serialize a node-fetched record and populate the cache best-effort.
fn cache_and_render(cache: &CacheStore, key: &str, txn: &Transaction) -> anyhow::Result<String> {
    let payload = serialize_transaction(txn, FieldMask::ALL)?;
    if let Err(e) = cache.set(key, &payload) {
        warn!("failed to cache transaction {key}: {e}");
    }
    Ok(payload)
}

/// Serve a transaction object by hash.
///
/// Cache hit returns the cached wire payload verbatim; any cache failure
/// falls through to the node. `Ok(None)` when the node does not know the
/// hash.
pub fn get_transaction_object(
    cache: &CacheStore,
    node: &dyn NodeClient,
    hash: &TernaryBuffer,
) -> anyhow::Result<Option<String>> {
    let key = hash.to_trytes();
    match cache.get(&key) {
        Ok(payload) => return Ok(Some(payload)),
        Err(e) => debug!("cache get fell through for {key}: {e}"),
    }

    let Some(txn) = node.get_transaction(hash)? else {
        return Ok(None);
    };
    Ok(Some(cache_and_render(cache, &key, &txn)?))
}

/// Serve full transaction objects for a batch of hashes, preserving the
/// request's hash order. Cached entries are decoded; only uncached hashes
/// reach the node. Hashes unknown to both sides are skipped.
pub fn find_transaction_objects(
    cache: &CacheStore,
    node: &dyn NodeClient,
    req: &FindTransactionObjectsRequest,
) -> anyhow::Result<String> {
    let mut slots: Vec<Option<Transaction>> = Vec::with_capacity(req.len());
    let mut uncached: Vec<(usize, TernaryBuffer)> = Vec::new();

    for (i, hash) in req.iter().enumerate() {
        let key = hash.to_trytes();
        match cache.get(&key).and_then(|payload| {
            // a corrupt cached payload falls through like a miss
            deserialize_transaction(&payload)
        }) {
            Ok(txn) => slots.push(Some(txn)),
            Err(e) => {
                debug!("cache get fell through for {key}: {e}");
                slots.push(None);
                uncached.push((i, hash.clone()));
            }
        }
    }

    for (i, hash) in uncached {
        if let Some(txn) = node.get_transaction(&hash)? {
            cache_and_render(cache, &hash.to_trytes(), &txn)?;
            slots[i] = Some(txn);
        }
    }

    let mut res = FindTransactionObjectsResponse::new();
    for txn in slots.into_iter().flatten() {
        res.push(txn);
    }
    Ok(serialize_transaction_list(&res)?)
}

/// Serve the current tips as `{"tips":[...]}`.
pub fn get_tips(node: &dyn NodeClient) -> anyhow::Result<String> {
    let mut res = GetTipsResponse::new();
    for tip in node.get_tips()? {
        res.push(tip)?;
    }
    Ok(serialize_get_tips(&res)?)
}

/// Serve `{"hashes":[...]}` for the transactions on an address.
pub fn find_transactions(
    node: &dyn NodeClient,
    address: &TernaryBuffer,
) -> anyhow::Result<String> {
    let mut res = FindTransactionsResponse::new();
    for hash in node.find_transactions(address)? {
        res.push(hash)?;
    }
    Ok(serialize_find_transactions(&res)?)
}

/// Decode a send-transfer request, submit it, and render `{"hash":...}`.
/// A malformed request fails the whole call; nothing is sent.
pub fn send_transfer(node: &dyn NodeClient, request_text: &str) -> anyhow::Result<String> {
    let req = deserialize_send_transfer(request_text)?;
    let hash = node.send_transfer(&req)?;
    let res = SendTransferResponse::new(hash)?;
    Ok(serialize_send_transfer(&res)?)
}
